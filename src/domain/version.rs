use crate::error::{PkgVerError, Result};
use std::fmt;

/// Semver grammar accepted for candidate strings (leading `v` allowed)
pub const SEMVER_PATTERN: &str = r"^v?(\d+)\.(\d+)\.(\d+)(-[\w.-]+)?(\+[\w.-]+)?$";

/// Components captured from a semver-shaped string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverComponents {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Prerelease part including its leading `-`
    pub prerelease: Option<String>,
    /// Build metadata including its leading `+`
    pub build_meta: Option<String>,
}

impl SemverComponents {
    /// Parse a candidate such as "v1.2.3-4.abc123" against the semver grammar
    pub fn parse(candidate: &str) -> Result<Self> {
        let re = regex::Regex::new(SEMVER_PATTERN)
            .map_err(|e| PkgVerError::semver(format!("Invalid semver grammar: {}", e)))?;

        let captures = re.captures(candidate).ok_or_else(|| {
            PkgVerError::semver(format!(
                "'{}' does not match MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]",
                candidate
            ))
        })?;

        let number = |idx: usize| -> Result<u64> {
            let text = captures.get(idx).map(|m| m.as_str()).unwrap_or_default();
            text.parse::<u64>().map_err(|_| {
                PkgVerError::semver(format!("Version component '{}' out of range", text))
            })
        };

        Ok(SemverComponents {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease: captures.get(4).map(|m| m.as_str().to_string()),
            build_meta: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// The bare "MAJOR.MINOR.PATCH" core
    pub fn core(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A version string guaranteed to read `MAJOR.MINOR.PATCH[-PRERELEASE]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedVersion(String);

impl ResolvedVersion {
    /// A clean release: just the version core
    pub fn release(components: &SemverComponents) -> Self {
        ResolvedVersion(components.core())
    }

    /// A development build: the version core followed by the prerelease part
    pub fn development(components: &SemverComponents) -> Self {
        let prerelease = components.prerelease.as_deref().unwrap_or_default();
        ResolvedVersion(format!("{}{}", components.core(), prerelease))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the version carries a prerelease part
    pub fn is_prerelease(&self) -> bool {
        self.0.contains('-')
    }

    /// The `MAJOR.MINOR.PATCH` core as a `semver::Version`.
    ///
    /// The prerelease part is left out: short hashes such as "0123" are not
    /// valid numeric identifiers under strict semver.
    pub fn core_version(&self) -> Result<semver::Version> {
        let core = self.0.split('-').next().unwrap_or_default();
        semver::Version::parse(core)
            .map_err(|e| PkgVerError::semver(format!("'{}': {}", self.0, e)))
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
