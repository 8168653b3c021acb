use anyhow::Result;
use clap::{Parser, Subcommand};
use git_pkgver::config;
use git_pkgver::ui;
use git_pkgver::PackageRecipe;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "git-pkgver",
    version,
    about = "Derive package name and version from a manifest and git tags, then build and stage it"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Source tree / repository root")]
    root: PathBuf,

    #[arg(short, long, help = "Manifest path relative to the root")]
    manifest: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the project name declared by the manifest
    Name,
    /// Print the version derived from git tags
    Version,
    /// Show name, version, artifacts and identity warnings
    Info,
    /// Configure (once) and compile
    Build,
    /// Configure (once), compile and install into the staging prefix
    Package,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())?;
    if let Some(manifest) = args.manifest {
        config.package.manifest = manifest;
    }

    let mut recipe = PackageRecipe::open(&args.root, &config)?;

    match args.command {
        Command::Name => ui::print_value(recipe.name()?)?,
        Command::Version => ui::print_value(recipe.version()?)?,
        Command::Info => {
            let identity = recipe.identity()?;
            ui::display_identity(&identity, recipe.metadata());
        }
        Command::Build => {
            let name = recipe.name()?;
            let version = recipe.version()?;
            ui::display_status(&format!("Building {} {}", name, version));
            recipe.build()?;
            ui::display_success(&format!("Built {} {}", name, version));
        }
        Command::Package => {
            let name = recipe.name()?;
            let version = recipe.version()?;
            ui::display_status(&format!("Building {} {}", name, version));
            recipe.build()?;
            ui::display_status("Staging artifacts");
            recipe.package()?;
            ui::display_success(&format!(
                "Packaged {} {} ({})",
                name,
                version,
                recipe.describe_artifacts()?.join(", ")
            ));
        }
    }

    Ok(())
}
