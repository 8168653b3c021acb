use crate::error::{PkgVerError, Result};
use git2::{DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use std::path::Path;

/// Default suffix `git describe --dirty` appends
pub const DEFAULT_DIRTY_SUFFIX: &str = "-dirty";

/// Wrapper around git2::Repository with our query interface
pub struct Git2Repository {
    repo: Git2Repo,
    dirty_suffix: String,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            PkgVerError::vcs(format!(
                "Not in a git repository '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo,
            dirty_suffix: DEFAULT_DIRTY_SUFFIX.to_string(),
        }
    }

    /// Use a different marker for dirty working trees
    pub fn with_dirty_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.dirty_suffix = suffix.into();
        self
    }

    fn describe_options() -> DescribeOptions {
        let mut opts = DescribeOptions::new();
        opts.describe_tags();
        opts
    }
}

impl super::VcsQuery for Git2Repository {
    fn describe_dirty(&self) -> Result<String> {
        let describe = self
            .repo
            .describe(&Self::describe_options())
            .map_err(|e| PkgVerError::vcs(format!("Cannot describe HEAD: {}", e)))?;

        let mut format = DescribeFormatOptions::new();
        format.dirty_suffix(&self.dirty_suffix);

        let label = describe
            .format(Some(&format))
            .map_err(|e| PkgVerError::vcs(format!("Cannot format describe output: {}", e)))?;

        Ok(label.trim().to_string())
    }

    fn describe_nearest_tag(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| PkgVerError::vcs(format!("Cannot resolve HEAD: {}", e)))?;

        let describe = head
            .as_object()
            .describe(&Self::describe_options())
            .map_err(|e| PkgVerError::vcs(format!("No tag reachable from HEAD: {}", e)))?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        let tag = describe
            .format(Some(&format))
            .map_err(|e| PkgVerError::vcs(format!("Cannot format describe output: {}", e)))?;

        Ok(tag.trim().to_string())
    }

    fn commits_since(&self, tag: &str) -> Result<u32> {
        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| PkgVerError::vcs(format!("Cannot start revision walk: {}", e)))?;

        revwalk
            .push_range(&format!("{}..HEAD", tag))
            .map_err(|e| PkgVerError::vcs(format!("Cannot walk '{}..HEAD': {}", tag, e)))?;

        let mut count: u32 = 0;
        for oid in revwalk {
            oid.map_err(|e| PkgVerError::vcs(format!("Revision walk failed: {}", e)))?;
            count += 1;
        }

        Ok(count)
    }

    fn short_head_hash(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| PkgVerError::vcs(format!("Cannot resolve HEAD: {}", e)))?;

        let short = head
            .as_object()
            .short_id()
            .map_err(|e| PkgVerError::vcs(format!("Cannot abbreviate HEAD id: {}", e)))?;

        short
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| PkgVerError::vcs("Short hash is not valid UTF-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_outside_repository_is_vcs_error() {
        let dir = tempfile::TempDir::new().unwrap();
        // A fresh temp dir may still sit below a repository on some machines,
        // so only assert on the error shape when opening fails.
        if let Err(err) = Git2Repository::open(dir.path()) {
            assert!(matches!(err, PkgVerError::VcsQuery(_)));
        }
    }
}
