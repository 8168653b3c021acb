// tests/config_test.rs
use git_pkgver::config::{load_config, Config, LOCAL_CONFIG_FILE};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.package.manifest, "CMakeLists.txt");
    assert!(config.package.libs.is_empty());
    assert_eq!(config.build.build_dir, "build");
    assert_eq!(config.version.dirty_marker, "-dirty");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[package]
manifest = "cmake/CMakeLists.txt"
license = "BSD"
url = "https://gitlab.com/mariokonrad/semver"
libs = ["semver"]

[build]
build_type = "Debug"
generator = "Ninja"
shared = true
install_prefix = "stage"

[build.definitions]
WITH_DOCS = "OFF"

[version]
dirty_marker = "-wip"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.package.manifest, "cmake/CMakeLists.txt");
    assert_eq!(config.package.license.as_deref(), Some("BSD"));
    assert_eq!(config.package.libs, vec!["semver".to_string()]);
    assert_eq!(config.build.build_type, "Debug");
    assert_eq!(config.build.generator.as_deref(), Some("Ninja"));
    assert!(config.build.shared);
    assert_eq!(config.build.install_prefix.as_deref(), Some("stage"));
    assert_eq!(
        config.build.definitions.get("WITH_DOCS"),
        Some(&"OFF".to_string())
    );
    assert_eq!(config.version.dirty_marker, "-wip");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = load_config(Some("/nonexistent/pkgver.toml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[build]\nshared = \"maybe\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_local_config_file_is_picked_up() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[package]\nlibs = [\"local\"]\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().package.libs, vec!["local".to_string()]);
}
