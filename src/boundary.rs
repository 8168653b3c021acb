use crate::domain::{DescribeInfo, ProjectDeclaration, ResolvedVersion};
use std::fmt;

/// Non-fatal inconsistencies in a package's identity.
/// These never stop a build but should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityWarning {
    /// Manifest declares a VERSION that differs from the tag-derived one
    ManifestVersionMismatch { manifest: String, resolved: String },
    /// Working tree has uncommitted changes
    DirtyWorkingTree { label: String },
    /// HEAD is ahead of the last release tag
    UntaggedCommits { tag: String, count: u32 },
}

impl fmt::Display for IdentityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityWarning::ManifestVersionMismatch { manifest, resolved } => write!(
                f,
                "Manifest declares version {} but tags resolve to {}",
                manifest, resolved
            ),
            IdentityWarning::DirtyWorkingTree { label } => {
                write!(f, "Working tree has uncommitted changes ({})", label)
            }
            IdentityWarning::UntaggedCommits { tag, count } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(f, "{} {} since tag '{}'", count, noun, tag)
            }
        }
    }
}

/// Collect identity warnings for a resolved package
///
/// The manifest version is compared against the resolved version's
/// `MAJOR.MINOR.PATCH` only; a prerelease suffix alone is not a mismatch.
pub fn check_identity(
    declaration: &ProjectDeclaration,
    info: &DescribeInfo,
    version: &ResolvedVersion,
    dirty_marker: &str,
) -> Vec<IdentityWarning> {
    let mut warnings = Vec::new();

    if let Some(manifest_version) = &declaration.version {
        let matches = match (manifest_core(manifest_version), version.core_version()) {
            (Some(manifest), Ok(resolved)) => manifest == resolved,
            _ => false,
        };
        if !matches {
            warnings.push(IdentityWarning::ManifestVersionMismatch {
                manifest: manifest_version.clone(),
                resolved: version.to_string(),
            });
        }
    }

    if info.commits_since_tag > 0 {
        warnings.push(IdentityWarning::UntaggedCommits {
            tag: info.last_tag.clone(),
            count: info.commits_since_tag,
        });
    }

    if info.is_dirty(dirty_marker) {
        warnings.push(IdentityWarning::DirtyWorkingTree {
            label: info.dirty_label.clone(),
        });
    }

    warnings
}

// CMake compares VERSION components as integers, so "1.02.0" equals "1.2.0".
fn manifest_core(literal: &str) -> Option<semver::Version> {
    let mut parts = literal.split('.').map(|part| part.parse::<u64>().ok());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Some(major)), Some(Some(minor)), Some(Some(patch)), None) => {
            Some(semver::Version::new(major, minor, patch))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{extract_declaration, SemverComponents};

    fn info(label: &str, count: u32) -> DescribeInfo {
        DescribeInfo {
            dirty_label: label.to_string(),
            last_tag: "v1.2.3".to_string(),
            commits_since_tag: count,
            short_hash: "abc".to_string(),
        }
    }

    fn release(candidate: &str) -> ResolvedVersion {
        ResolvedVersion::release(&SemverComponents::parse(candidate).unwrap())
    }

    fn development(candidate: &str) -> ResolvedVersion {
        ResolvedVersion::development(&SemverComponents::parse(candidate).unwrap())
    }

    #[test]
    fn test_consistent_identity_has_no_warnings() {
        let decl = extract_declaration("project(foo VERSION 1.2.3)").unwrap();
        let warnings = check_identity(&decl, &info("v1.2.3", 0), &release("v1.2.3"), "-dirty");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_manifest_without_version_is_never_mismatched() {
        let decl = extract_declaration("project(foo)").unwrap();
        let warnings = check_identity(&decl, &info("v9.9.9", 0), &release("v9.9.9"), "-dirty");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_prerelease_matching_core_is_not_mismatch() {
        let decl = extract_declaration("project(foo VERSION 1.2.3)").unwrap();
        let warnings = check_identity(
            &decl,
            &info("v1.2.3-2-gabc", 2),
            &development("v1.2.3-2.abc"),
            "-dirty",
        );
        assert_eq!(
            warnings,
            vec![IdentityWarning::UntaggedCommits {
                tag: "v1.2.3".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_all_warnings() {
        let decl = extract_declaration("project(foo VERSION 1.0.0)").unwrap();
        let warnings = check_identity(
            &decl,
            &info("v1.2.3-1-gabc-dirty", 1),
            &development("v1.2.3-1.abc"),
            "-dirty",
        );
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].to_string().contains("1.0.0"));
        assert!(warnings[0].to_string().contains("1.2.3-1.abc"));
        assert_eq!(warnings[1].to_string(), "1 commit since tag 'v1.2.3'");
        assert!(warnings[2].to_string().contains("uncommitted"));
    }

    #[test]
    fn test_manifest_version_compared_numerically() {
        let decl = extract_declaration("project(foo VERSION 1.02.3)").unwrap();
        let warnings = check_identity(&decl, &info("v1.2.3", 0), &release("v1.2.3"), "-dirty");
        assert!(warnings.is_empty(), "{:?}", warnings);
    }
}
