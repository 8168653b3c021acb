//! Git query abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of
//! repository queries that version derivation needs, allowing the resolver
//! to run against a real repository or a mock.
//!
//! # Overview
//!
//! The primary abstraction is the [VcsQuery] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [VcsQuery] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use git_pkgver::git::VcsQuery;
//! # fn example<R: VcsQuery>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tag = repo.describe_nearest_tag()?;
//! let count = repo.commits_since(&tag)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Repository queries consumed by version derivation
///
/// Each query returns a single trimmed value. Implementations map underlying
/// failures (like `git2::Error`) to [crate::error::PkgVerError::VcsQuery].
pub trait VcsQuery {
    /// Describe HEAD using any tag, appending the dirty marker when the
    /// working tree has uncommitted changes.
    ///
    /// Equivalent to `git describe --tags --dirty`.
    ///
    /// # Returns
    /// * `Ok(String)` - Label such as `v1.2.3-4-gabc1234-dirty`
    /// * `Err` - If no tag is reachable from HEAD or on Git error
    fn describe_dirty(&self) -> Result<String>;

    /// Name of the nearest tag reachable from HEAD.
    ///
    /// Equivalent to `git describe --tags --abbrev=0`.
    fn describe_nearest_tag(&self) -> Result<String>;

    /// Number of commits reachable from HEAD but not from `tag`.
    ///
    /// Equivalent to `git rev-list <tag>..HEAD --count`.
    ///
    /// # Arguments
    /// * `tag` - Tag name to count from (exclusive)
    fn commits_since(&self, tag: &str) -> Result<u32>;

    /// Abbreviated object id of HEAD.
    ///
    /// Equivalent to `git rev-parse --short HEAD`.
    fn short_head_hash(&self) -> Result<String>;
}

impl<T: VcsQuery + ?Sized> VcsQuery for &T {
    fn describe_dirty(&self) -> Result<String> {
        (**self).describe_dirty()
    }

    fn describe_nearest_tag(&self) -> Result<String> {
        (**self).describe_nearest_tag()
    }

    fn commits_since(&self, tag: &str) -> Result<u32> {
        (**self).commits_since(tag)
    }

    fn short_head_hash(&self) -> Result<String> {
        (**self).short_head_hash()
    }
}
