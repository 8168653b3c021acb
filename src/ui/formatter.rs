//! Pure formatting functions for UI output.
//!
//! Everything here writes human-oriented text; machine-readable values go
//! through [super::print_value].

use crate::boundary::IdentityWarning;
use crate::recipe::{PackageIdentity, PackageMetadata};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display an identity warning in yellow with a warning icon.
pub fn display_identity_warning(warning: &IdentityWarning) {
    eprintln!("{} {}", style("⚠").yellow(), style(warning).yellow());
}

/// Render a package identity as aligned `key: value` lines.
pub fn format_identity(identity: &PackageIdentity, metadata: &PackageMetadata) -> String {
    let mut rows: Vec<(&str, String)> = vec![("name", identity.name.to_string())];

    if identity.version.is_prerelease() {
        rows.push(("version", format!("{} (development)", identity.version)));
    } else {
        rows.push(("version", identity.version.to_string()));
    }

    if let Some(manifest_version) = &identity.manifest_version {
        rows.push(("manifest version", manifest_version.clone()));
    }
    rows.push(("libs", identity.artifacts.join(", ")));

    if let Some(license) = &metadata.license {
        rows.push(("license", license.clone()));
    }
    if let Some(url) = &metadata.url {
        rows.push(("url", url.clone()));
    }
    if let Some(description) = &metadata.description {
        rows.push(("description", description.clone()));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{:>width$}: {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a package identity followed by its warnings.
pub fn display_identity(identity: &PackageIdentity, metadata: &PackageMetadata) {
    println!("{}", format_identity(identity, metadata));
    for warning in &identity.warnings {
        display_identity_warning(warning);
    }
}
