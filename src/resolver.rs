//! Version derivation from tag history and working-tree state

use crate::domain::{DescribeInfo, ResolvedVersion, SemverComponents};
use crate::error::{PkgVerError, Result};
use crate::git::repository::DEFAULT_DIRTY_SUFFIX;
use crate::git::{Git2Repository, VcsQuery};
use std::path::Path;
use tracing::debug;

/// Computes a semver string from the current repository state
pub struct VersionResolver<R: VcsQuery> {
    repo: R,
    dirty_marker: String,
}

impl<R: VcsQuery> VersionResolver<R> {
    /// Create a resolver over the given repository
    pub fn new(repo: R) -> Self {
        VersionResolver {
            repo,
            dirty_marker: DEFAULT_DIRTY_SUFFIX.to_string(),
        }
    }

    /// Use a different dirty marker when inspecting the describe label
    pub fn with_dirty_marker(mut self, marker: impl Into<String>) -> Self {
        self.dirty_marker = marker.into();
        self
    }

    /// Run the four VCS queries and collect their results
    pub fn describe(&self) -> Result<DescribeInfo> {
        let dirty_label = self.repo.describe_dirty()?;
        let last_tag = self.repo.describe_nearest_tag()?;
        let count = self.repo.commits_since(&last_tag)?;
        let short_hash = self.repo.short_head_hash()?;

        debug!(
            label = %dirty_label,
            tag = %last_tag,
            count,
            hash = %short_hash,
            "queried repository state"
        );

        DescribeInfo::new(&dirty_label, &last_tag, count, &short_hash)
    }

    /// Derive the version for the current repository state.
    ///
    /// Exactly tagged clean trees yield the bare `MAJOR.MINOR.PATCH`; anything
    /// ahead of the tag or dirty gets the candidate's prerelease appended.
    pub fn resolve(&self) -> Result<ResolvedVersion> {
        let info = self.describe()?;
        resolve_from(&info, &self.dirty_marker)
    }
}

/// Derive a version from already-collected repository state
pub fn resolve_from(info: &DescribeInfo, dirty_marker: &str) -> Result<ResolvedVersion> {
    let candidate = info.candidate();
    let components = SemverComponents::parse(&candidate)?;

    let version = if info.commits_since_tag > 0 || info.is_dirty(dirty_marker) {
        // A tag with build metadata swallows the count and hash into the
        // metadata, leaving nothing to mark the build as unreleased.
        if components.prerelease.is_none() {
            return Err(PkgVerError::semver(format!(
                "Tag '{}' carries build metadata; cannot derive a prerelease from '{}'",
                info.last_tag, candidate
            )));
        }
        ResolvedVersion::development(&components)
    } else {
        ResolvedVersion::release(&components)
    };

    debug!(candidate = %candidate, version = %version, "resolved version");
    Ok(version)
}

/// Resolve the version of the repository containing `repo_path`
pub fn resolve_version<P: AsRef<Path>>(repo_path: P) -> Result<ResolvedVersion> {
    let repo = Git2Repository::open(repo_path)?;
    VersionResolver::new(repo).resolve()
}
