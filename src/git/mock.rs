use crate::error::{PkgVerError, Result};
use crate::git::VcsQuery;
use std::cell::Cell;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    last_tag: Option<String>,
    commits_since_tag: u32,
    short_hash: String,
    dirty: bool,
    failing_query: Option<&'static str>,
    queries: Cell<usize>,
}

impl MockRepository {
    /// Create a mock sitting exactly on `tag` with a clean tree
    pub fn tagged(tag: impl Into<String>) -> Self {
        MockRepository {
            last_tag: Some(tag.into()),
            commits_since_tag: 0,
            short_hash: "abc1234".to_string(),
            dirty: false,
            failing_query: None,
            queries: Cell::new(0),
        }
    }

    /// Create a mock with no reachable tag
    pub fn untagged() -> Self {
        MockRepository {
            last_tag: None,
            ..Self::tagged("")
        }
    }

    /// Set the number of commits on top of the tag
    pub fn with_commits(mut self, count: u32) -> Self {
        self.commits_since_tag = count;
        self
    }

    /// Set the abbreviated HEAD hash
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.short_hash = hash.into();
        self
    }

    /// Mark the working tree as having local changes
    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Make one named query fail ("describe_dirty", "describe_nearest_tag",
    /// "commits_since" or "short_head_hash")
    pub fn failing(mut self, query: &'static str) -> Self {
        self.failing_query = Some(query);
        self
    }

    /// Total number of queries answered so far
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    fn record(&self, query: &'static str) -> Result<()> {
        self.queries.set(self.queries.get() + 1);
        if self.failing_query == Some(query) {
            return Err(PkgVerError::vcs(format!("{} failed", query)));
        }
        Ok(())
    }

    fn tag(&self) -> Result<&str> {
        self.last_tag
            .as_deref()
            .ok_or_else(|| PkgVerError::vcs("No names found, cannot describe anything"))
    }
}

impl VcsQuery for MockRepository {
    fn describe_dirty(&self) -> Result<String> {
        self.record("describe_dirty")?;
        let tag = self.tag()?;

        let mut label = if self.commits_since_tag > 0 {
            format!("{}-{}-g{}", tag, self.commits_since_tag, self.short_hash)
        } else {
            tag.to_string()
        };
        if self.dirty {
            label.push_str("-dirty");
        }
        Ok(label)
    }

    fn describe_nearest_tag(&self) -> Result<String> {
        self.record("describe_nearest_tag")?;
        self.tag().map(str::to_string)
    }

    fn commits_since(&self, tag: &str) -> Result<u32> {
        self.record("commits_since")?;
        if self.tag()? != tag {
            return Err(PkgVerError::vcs(format!("Unknown revision '{}'", tag)));
        }
        Ok(self.commits_since_tag)
    }

    fn short_head_hash(&self) -> Result<String> {
        self.record("short_head_hash")?;
        Ok(self.short_hash.clone())
    }
}
