use crate::config::BuildConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Cache definition that switches off the project's own test suite
pub const DISABLE_TESTING: &str = "DISABLE_TESTING";

/// Cache definition that switches off the project's example programs
pub const DISABLE_EXAMPLES: &str = "DISABLE_EXAMPLES";

/// Build configuration passed to every toolchain step
///
/// Created once by [crate::orchestrator::BuildOrchestrator] and then only
/// read by the compile and install steps. The configure step may record
/// probe results into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigHandle {
    source_dir: PathBuf,
    build_dir: PathBuf,
    build_type: String,
    generator: Option<String>,
    install_prefix: Option<PathBuf>,
    definitions: BTreeMap<String, String>,
    probed: BTreeMap<String, String>,
}

impl ConfigHandle {
    /// Seed a handle from build settings.
    ///
    /// Relative build directories and install prefixes are resolved against
    /// `source_dir`. User definitions are applied first so the two fixed
    /// disable options always win.
    pub fn new(source_dir: &Path, build: &BuildConfig) -> Self {
        let mut definitions = BTreeMap::new();
        definitions.insert("CMAKE_BUILD_TYPE".to_string(), build.build_type.clone());
        definitions.insert(
            "BUILD_SHARED_LIBS".to_string(),
            if build.shared { "ON" } else { "OFF" }.to_string(),
        );

        let install_prefix = build
            .install_prefix
            .as_ref()
            .map(|prefix| source_dir.join(prefix));
        if let Some(prefix) = &install_prefix {
            definitions.insert(
                "CMAKE_INSTALL_PREFIX".to_string(),
                prefix.display().to_string(),
            );
        }

        for (key, value) in &build.definitions {
            definitions.insert(key.clone(), value.clone());
        }
        definitions.insert(DISABLE_TESTING.to_string(), "TRUE".to_string());
        definitions.insert(DISABLE_EXAMPLES.to_string(), "TRUE".to_string());

        ConfigHandle {
            source_dir: source_dir.to_path_buf(),
            build_dir: source_dir.join(&build.build_dir),
            build_type: build.build_type.clone(),
            generator: build.generator.clone(),
            install_prefix,
            definitions,
            probed: BTreeMap::new(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn build_type(&self) -> &str {
        &self.build_type
    }

    pub fn generator(&self) -> Option<&str> {
        self.generator.as_deref()
    }

    pub fn install_prefix(&self) -> Option<&Path> {
        self.install_prefix.as_deref()
    }

    /// Cache definitions in key order
    pub fn definitions(&self) -> &BTreeMap<String, String> {
        &self.definitions
    }

    pub fn definition(&self, key: &str) -> Option<&str> {
        self.definitions.get(key).map(String::as_str)
    }

    /// Record a value discovered while probing the toolchain
    pub fn record_probe(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.probed.insert(key.into(), value.into());
    }

    /// Values recorded by the configure step
    pub fn probed(&self) -> &BTreeMap<String, String> {
        &self.probed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_options_always_present() {
        let handle = ConfigHandle::new(Path::new("/src"), &BuildConfig::default());
        assert_eq!(handle.definition(DISABLE_TESTING), Some("TRUE"));
        assert_eq!(handle.definition(DISABLE_EXAMPLES), Some("TRUE"));
        assert_eq!(handle.definition("CMAKE_BUILD_TYPE"), Some("Release"));
        assert_eq!(handle.definition("BUILD_SHARED_LIBS"), Some("OFF"));
        assert_eq!(handle.build_dir(), Path::new("/src/build"));
        assert!(handle.install_prefix().is_none());
    }

    #[test]
    fn test_user_definitions_cannot_reenable_tests() {
        let mut build = BuildConfig::default();
        build
            .definitions
            .insert(DISABLE_TESTING.to_string(), "FALSE".to_string());
        build
            .definitions
            .insert("WITH_DOCS".to_string(), "OFF".to_string());

        let handle = ConfigHandle::new(Path::new("/src"), &build);
        assert_eq!(handle.definition(DISABLE_TESTING), Some("TRUE"));
        assert_eq!(handle.definition("WITH_DOCS"), Some("OFF"));
    }

    #[test]
    fn test_shared_and_prefix() {
        let build = BuildConfig {
            shared: true,
            install_prefix: Some("stage".to_string()),
            ..BuildConfig::default()
        };
        let handle = ConfigHandle::new(Path::new("/src"), &build);
        assert_eq!(handle.definition("BUILD_SHARED_LIBS"), Some("ON"));
        assert_eq!(handle.install_prefix(), Some(Path::new("/src/stage")));
        assert_eq!(handle.definition("CMAKE_INSTALL_PREFIX"), Some("/src/stage"));
    }
}
