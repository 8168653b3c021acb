use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "pkgver.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".pkgver.toml";

/// Represents the complete configuration for git-pkgver.
///
/// Contains package metadata, build settings and version derivation options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub version: VersionConfig,
}

fn default_manifest() -> String {
    "CMakeLists.txt".to_string()
}

/// Package identity and metadata settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageConfig {
    /// Path to the build manifest holding the `project(...)` declaration
    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default)]
    pub license: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Library artifacts produced by the package. Empty means "named after the project".
    #[serde(default)]
    pub libs: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        PackageConfig {
            manifest: default_manifest(),
            license: None,
            description: None,
            url: None,
            libs: Vec::new(),
        }
    }
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_build_type() -> String {
    "Release".to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

/// Settings used to seed the build configuration handle.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    #[serde(default = "default_build_type")]
    pub build_type: String,

    #[serde(default)]
    pub generator: Option<String>,

    /// Build shared instead of static libraries
    #[serde(default)]
    pub shared: bool,

    /// Staging directory for the install step, relative to the source tree
    #[serde(default)]
    pub install_prefix: Option<String>,

    /// Toolchain executable
    #[serde(default = "default_cmake")]
    pub cmake: String,

    /// Extra cache definitions passed to the configure step
    #[serde(default)]
    pub definitions: BTreeMap<String, String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            build_dir: default_build_dir(),
            build_type: default_build_type(),
            generator: None,
            shared: false,
            install_prefix: None,
            cmake: default_cmake(),
            definitions: BTreeMap::new(),
        }
    }
}

fn default_dirty_marker() -> String {
    "-dirty".to_string()
}

/// Options for version derivation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// Suffix appended by describe when the working tree has local changes
    #[serde(default = "default_dirty_marker")]
    pub dirty_marker: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            dirty_marker: default_dirty_marker(),
        }
    }
}

/// Parses configuration from a TOML string.
pub fn parse_config(config_str: &str) -> Result<Config> {
    Ok(toml::from_str(config_str)?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `pkgver.toml` in current directory
/// 3. `.pkgver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}
