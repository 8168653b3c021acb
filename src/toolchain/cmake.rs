use crate::error::{PkgVerError, Result};
use crate::toolchain::{ConfigHandle, Toolchain};
use std::ffi::OsString;
use std::process::Command;
use tracing::{debug, info};

/// Drives a build tree through the `cmake` command line
pub struct CMakeToolchain {
    program: String,
}

impl CMakeToolchain {
    /// Create a toolchain that runs the given cmake executable
    pub fn new(program: impl Into<String>) -> Self {
        CMakeToolchain {
            program: program.into(),
        }
    }

    /// Arguments for the configure step
    pub fn configure_args(handle: &ConfigHandle) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-S".into(),
            handle.source_dir().into(),
            "-B".into(),
            handle.build_dir().into(),
        ];

        if let Some(generator) = handle.generator() {
            args.push("-G".into());
            args.push(generator.into());
        }

        for (key, value) in handle.definitions() {
            args.push(format!("-D{}={}", key, value).into());
        }

        args
    }

    /// Arguments for the compile step
    pub fn build_args(handle: &ConfigHandle) -> Vec<OsString> {
        vec![
            "--build".into(),
            handle.build_dir().into(),
            "--config".into(),
            handle.build_type().into(),
        ]
    }

    /// Arguments for the install step
    pub fn install_args(handle: &ConfigHandle) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--install".into(),
            handle.build_dir().into(),
            "--config".into(),
            handle.build_type().into(),
        ];

        if let Some(prefix) = handle.install_prefix() {
            args.push("--prefix".into());
            args.push(prefix.into());
        }

        args
    }

    /// Run cmake with the given arguments and return its stdout.
    ///
    /// A missing executable or a non-zero exit code is a toolchain error
    /// carrying the captured output.
    fn run(&self, step: &str, args: &[OsString]) -> Result<String> {
        info!(step, program = %self.program, "running toolchain step");
        debug!(?args, "toolchain arguments");

        let output = Command::new(&self.program).args(args).output().map_err(|e| {
            PkgVerError::toolchain(format!("Failed to execute {}: {}", self.program, e))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PkgVerError::toolchain(format!(
                "{} step failed with exit code {}\nStdout: {}\nStderr: {}",
                step,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(stdout)
    }
}

impl Default for CMakeToolchain {
    fn default() -> Self {
        Self::new("cmake")
    }
}

impl Toolchain for CMakeToolchain {
    fn configure(&mut self, handle: &mut ConfigHandle) -> Result<()> {
        let version = self.run("probe", &["--version".into()])?;
        if let Some(first_line) = version.lines().next() {
            handle.record_probe("cmake_version", first_line.trim());
        }

        self.run("configure", &Self::configure_args(handle))?;
        Ok(())
    }

    fn compile_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        self.run("build", &Self::build_args(handle))?;
        Ok(())
    }

    fn install_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        self.run("install", &Self::install_args(handle))?;
        Ok(())
    }
}
