use thiserror::Error;

/// Unified error type for git-pkgver operations
#[derive(Error, Debug)]
pub enum PkgVerError {
    #[error("VCS query failed: {0}")]
    VcsQuery(String),

    #[error("Semver parsing error: {0}")]
    SemverParse(String),

    #[error("Manifest parsing error: {0}")]
    ManifestParse(String),

    #[error("Toolchain step failed: {0}")]
    Toolchain(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-pkgver
pub type Result<T> = std::result::Result<T, PkgVerError>;

impl PkgVerError {
    /// Create a VCS query error with context
    pub fn vcs(msg: impl Into<String>) -> Self {
        PkgVerError::VcsQuery(msg.into())
    }

    /// Create a semver parse error with context
    pub fn semver(msg: impl Into<String>) -> Self {
        PkgVerError::SemverParse(msg.into())
    }

    /// Create a manifest parse error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        PkgVerError::ManifestParse(msg.into())
    }

    /// Create a toolchain error with context
    pub fn toolchain(msg: impl Into<String>) -> Self {
        PkgVerError::Toolchain(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PkgVerError::Config(msg.into())
    }
}

impl From<toml::de::Error> for PkgVerError {
    fn from(err: toml::de::Error) -> Self {
        PkgVerError::Config(err.to_string())
    }
}
