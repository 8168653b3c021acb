use crate::error::{PkgVerError, Result};

/// Raw repository state as reported by the VCS queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeInfo {
    /// Output of a dirty-aware describe (e.g. "v1.2.3-4-gabc123-dirty")
    pub dirty_label: String,
    /// Nearest reachable tag
    pub last_tag: String,
    /// Number of commits in `last_tag..HEAD`
    pub commits_since_tag: u32,
    /// Abbreviated HEAD commit hash
    pub short_hash: String,
}

impl DescribeInfo {
    /// Build from the query results, trimming them and rejecting empty values
    pub fn new(
        dirty_label: &str,
        last_tag: &str,
        commits_since_tag: u32,
        short_hash: &str,
    ) -> Result<Self> {
        Ok(DescribeInfo {
            dirty_label: non_empty("dirty-aware describe", dirty_label)?,
            last_tag: non_empty("nearest tag", last_tag)?,
            commits_since_tag,
            short_hash: non_empty("short hash", short_hash)?,
        })
    }

    /// Whether the dirty-aware label carries the given dirty marker
    pub fn is_dirty(&self, marker: &str) -> bool {
        !marker.is_empty() && self.dirty_label.ends_with(marker)
    }

    /// Candidate version string fed to the semver grammar.
    ///
    /// A tag that already has a prerelease part gets the count and hash
    /// appended as extra dot-separated identifiers; otherwise they start
    /// a new prerelease part.
    pub fn candidate(&self) -> String {
        if self.last_tag.contains('-') {
            format!(
                "{}.{}.{}",
                self.last_tag, self.commits_since_tag, self.short_hash
            )
        } else {
            format!(
                "{}-{}.{}",
                self.last_tag, self.commits_since_tag, self.short_hash
            )
        }
    }
}

fn non_empty(what: &str, line: &str) -> Result<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(PkgVerError::vcs(format!("Empty output for {}", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(tag: &str, count: u32, hash: &str) -> DescribeInfo {
        DescribeInfo {
            dirty_label: tag.to_string(),
            last_tag: tag.to_string(),
            commits_since_tag: count,
            short_hash: hash.to_string(),
        }
    }

    #[test]
    fn test_candidate_release_tag() {
        assert_eq!(info("v1.2.3", 4, "abc123").candidate(), "v1.2.3-4.abc123");
    }

    #[test]
    fn test_candidate_prerelease_tag() {
        assert_eq!(
            info("v2.0.0-rc.1", 3, "def456").candidate(),
            "v2.0.0-rc.1.3.def456"
        );
    }

    #[test]
    fn test_new_trims_query_output() {
        let info = DescribeInfo::new(" v1.0.0-dirty\n", "v1.0.0\n", 0, "abc1234\n").unwrap();
        assert_eq!(info.dirty_label, "v1.0.0-dirty");
        assert_eq!(info.last_tag, "v1.0.0");
        assert_eq!(info.short_hash, "abc1234");
    }

    #[test]
    fn test_new_rejects_empty_output() {
        let err = DescribeInfo::new("v1.0.0", "  ", 0, "abc").unwrap_err();
        assert!(matches!(err, PkgVerError::VcsQuery(_)));
        assert!(err.to_string().contains("nearest tag"));

        let err = DescribeInfo::new("v1.0.0", "v1.0.0", 0, "").unwrap_err();
        assert!(err.to_string().contains("short hash"));
    }

    #[test]
    fn test_is_dirty() {
        let mut i = info("v1.2.3", 0, "abc");
        assert!(!i.is_dirty("-dirty"));
        i.dirty_label = "v1.2.3-dirty".to_string();
        assert!(i.is_dirty("-dirty"));
        assert!(!i.is_dirty(""));
    }
}
