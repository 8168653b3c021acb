//! Memoized configure/build/package lifecycle
//!
//! A [BuildOrchestrator] starts Unconfigured. The first successful
//! [BuildOrchestrator::configure] creates the [ConfigHandle] and moves to
//! Configured, where it stays for the life of the instance. Build and
//! package reuse that one handle.

use crate::config::BuildConfig;
use crate::error::{PkgVerError, Result};
use crate::toolchain::{ConfigHandle, Toolchain};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lifecycle state of an orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrchestratorState {
    Unconfigured,
    Configured,
}

/// Owns the build configuration handle and the toolchain that uses it
///
/// All operations take `&mut self`; concurrent use of one orchestrator must
/// go through a `Mutex` held around the whole call.
pub struct BuildOrchestrator<T: Toolchain> {
    toolchain: T,
    source_dir: PathBuf,
    build: BuildConfig,
    handle: Option<ConfigHandle>,
}

impl<T: Toolchain> BuildOrchestrator<T> {
    /// Create an unconfigured orchestrator for the source tree at `source_dir`
    pub fn new(toolchain: T, source_dir: impl AsRef<Path>, build: BuildConfig) -> Self {
        BuildOrchestrator {
            toolchain,
            source_dir: source_dir.as_ref().to_path_buf(),
            build,
            handle: None,
        }
    }

    pub fn state(&self) -> OrchestratorState {
        if self.handle.is_some() {
            OrchestratorState::Configured
        } else {
            OrchestratorState::Unconfigured
        }
    }

    pub fn is_configured(&self) -> bool {
        self.handle.is_some()
    }

    /// The configuration handle, once configured
    pub fn handle(&self) -> Option<&ConfigHandle> {
        self.handle.as_ref()
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    /// Configure the build tree at most once.
    ///
    /// When Unconfigured, seeds a handle (tests and examples disabled), runs
    /// the toolchain probe and keeps the handle. A probe failure is returned
    /// as-is and leaves the orchestrator Unconfigured, so a later call probes
    /// again. When Configured, returns the existing handle without touching
    /// the toolchain.
    pub fn configure(&mut self) -> Result<&ConfigHandle> {
        self.ensure_configured()?;
        self.configured_handle()
    }

    /// Configure if needed, then compile all targets
    pub fn build(&mut self) -> Result<()> {
        self.ensure_configured()?;
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| PkgVerError::toolchain("Build tree is not configured"))?;
        debug!(build_dir = %handle.build_dir().display(), "compiling");
        self.toolchain.compile_all(handle)
    }

    /// Configure if needed, then install (stage) the built artifacts
    pub fn package(&mut self) -> Result<()> {
        self.ensure_configured()?;
        let handle = self
            .handle
            .as_ref()
            .ok_or_else(|| PkgVerError::toolchain("Build tree is not configured"))?;
        debug!(build_dir = %handle.build_dir().display(), "installing");
        self.toolchain.install_all(handle)
    }

    fn ensure_configured(&mut self) -> Result<()> {
        if self.handle.is_some() {
            debug!("already configured, reusing handle");
            return Ok(());
        }

        let mut handle = ConfigHandle::new(&self.source_dir, &self.build);
        if let Err(e) = self.toolchain.configure(&mut handle) {
            warn!(error = %e, "toolchain configuration failed");
            return Err(e);
        }

        info!(build_dir = %handle.build_dir().display(), "configured build tree");
        self.handle = Some(handle);
        Ok(())
    }

    fn configured_handle(&self) -> Result<&ConfigHandle> {
        self.handle
            .as_ref()
            .ok_or_else(|| PkgVerError::toolchain("Build tree is not configured"))
    }
}
