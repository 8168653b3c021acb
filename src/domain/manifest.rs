//! Project declaration extraction from CMake-style build manifests
//!
//! Two shapes of `project(...)` are recognised:
//! - `project(name VERSION 1.2.3 ...)`, yielding the name and the version literal
//! - `project(name ...)` possibly spread over several lines, yielding only the name

use crate::error::{PkgVerError, Result};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;

const DECLARATION_WITH_VERSION: &str =
    r"(?i:\bproject)\s*\(\s*([A-Za-z0-9_-]+)\s+VERSION\s+(\d+\.\d+\.\d+)\b[^)]*\)";

const DECLARATION: &str = r"(?i:\bproject)\s*\(\s*([A-Za-z0-9_-]+)(?:\s[^)]*)?\)";

/// Project identifier declared by the manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed `project(...)` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDeclaration {
    pub name: ProjectName,
    /// `VERSION` literal, when the declaration carries one
    pub version: Option<String>,
}

/// Extract the project name from manifest text
pub fn extract_name(manifest_text: &str) -> Result<ProjectName> {
    extract_declaration(manifest_text).map(|decl| decl.name)
}

/// Extract the full project declaration from manifest text.
///
/// The first `project(...)` in the text wins. Its `VERSION` is captured when
/// it directly follows the name; otherwise only the name is kept. No match
/// is a manifest parse error.
pub fn extract_declaration(manifest_text: &str) -> Result<ProjectDeclaration> {
    let text = strip_comments(manifest_text);

    let bare = compile(DECLARATION)?;
    let captures = bare
        .captures(&text)
        .ok_or_else(|| PkgVerError::manifest("No project(...) declaration found"))?;
    let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
        return Err(PkgVerError::manifest("No project(...) declaration found"));
    };

    let with_version = compile(DECLARATION_WITH_VERSION)?;
    let version = with_version
        .captures_at(&text, whole.start())
        .filter(|c| c.get(0).map(|m| m.start()) == Some(whole.start()))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_string());

    Ok(ProjectDeclaration {
        name: ProjectName(name.as_str().to_string()),
        version,
    })
}

/// Read a manifest file and extract its project declaration
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<ProjectDeclaration> {
    let text = fs::read_to_string(path.as_ref())?;
    extract_declaration(&text).map_err(|e| match e {
        PkgVerError::ManifestParse(msg) => {
            PkgVerError::manifest(format!("{}: {}", path.as_ref().display(), msg))
        }
        other => other,
    })
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| PkgVerError::manifest(format!("Invalid pattern: {}", e)))
}

// Line comments only; a commented-out declaration must not count. A `#`
// inside a quoted argument is text, not a comment.
fn strip_comments(text: &str) -> String {
    text.lines()
        .map(|line| {
            let mut quoted = false;
            let mut escaped = false;
            for (idx, ch) in line.char_indices() {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' if quoted => escaped = true,
                    '"' => quoted = !quoted,
                    '#' if !quoted => return &line[..idx],
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_with_version() {
        let decl = extract_declaration("project(foo VERSION 1.0.0)").unwrap();
        assert_eq!(decl.name.as_str(), "foo");
        assert_eq!(decl.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_single_line_with_trailing_arguments() {
        let text = "cmake_minimum_required(VERSION 3.14)\nproject( semver VERSION 0.3.1 LANGUAGES CXX )\n";
        let decl = extract_declaration(text).unwrap();
        assert_eq!(decl.name.as_str(), "semver");
        assert_eq!(decl.version.as_deref(), Some("0.3.1"));
    }

    #[test]
    fn test_multi_line_without_version() {
        let text = "project(\n    bar\n    LANGUAGES CXX\n)\n";
        let decl = extract_declaration(text).unwrap();
        assert_eq!(decl.name.as_str(), "bar");
        assert_eq!(decl.version, None);
    }

    #[test]
    fn test_bare_declaration() {
        assert_eq!(extract_name("project(baz)").unwrap().as_str(), "baz");
        assert_eq!(extract_name("PROJECT (my_lib-2)").unwrap().as_str(), "my_lib-2");
    }

    #[test]
    fn test_identifier_stops_at_disallowed_character() {
        // "foo.bar" is not a valid identifier, so nothing matches
        assert!(extract_name("project(foo.bar)").is_err());
    }

    #[test]
    fn test_missing_declaration() {
        let err = extract_name("add_library(foo src/foo.cpp)\n").unwrap_err();
        assert!(matches!(err, PkgVerError::ManifestParse(_)));
    }

    #[test]
    fn test_empty_manifest() {
        assert!(extract_name("").is_err());
    }

    #[test]
    fn test_prefixed_command_is_not_a_declaration() {
        assert!(extract_name("add_project(foo)").is_err());
    }

    #[test]
    fn test_commented_declaration_ignored() {
        let text = "# project(old VERSION 0.0.1)\nproject(new)\n";
        let decl = extract_declaration(text).unwrap();
        assert_eq!(decl.name.as_str(), "new");
        assert_eq!(decl.version, None);
    }

    #[test]
    fn test_hash_inside_quoted_argument() {
        let decl =
            extract_declaration("project(foo VERSION 1.0.0 DESCRIPTION \"C# bindings\")").unwrap();
        assert_eq!(decl.name.as_str(), "foo");
        assert_eq!(decl.version.as_deref(), Some("1.0.0"));

        let decl =
            extract_declaration("project(foo DESCRIPTION \"C# bindings\" VERSION 1.0.0)").unwrap();
        assert_eq!(decl.name.as_str(), "foo");
    }

    #[test]
    fn test_trailing_comment_after_declaration() {
        let decl = extract_declaration("project(foo VERSION 2.0.0) # \"quoted\" note").unwrap();
        assert_eq!(decl.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_first_declaration_wins() {
        let text = "project(app)\nadd_subdirectory(dep)\nproject(dep VERSION 1.0.0)\n";
        let decl = extract_declaration(text).unwrap();
        assert_eq!(decl.name.as_str(), "app");
        assert_eq!(decl.version, None);
    }

    #[test]
    fn test_first_declaration_keeps_its_version() {
        let text = "project(app VERSION 3.1.4)\nproject(dep)\n";
        let decl = extract_declaration(text).unwrap();
        assert_eq!(decl.name.as_str(), "app");
        assert_eq!(decl.version.as_deref(), Some("3.1.4"));
    }
}
