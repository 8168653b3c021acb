use crate::error::{PkgVerError, Result};
use crate::toolchain::{ConfigHandle, Toolchain};

/// Toolchain double that records calls instead of running a compiler
#[derive(Debug, Default)]
pub struct RecordingToolchain {
    configure_calls: usize,
    compile_calls: usize,
    install_calls: usize,
    failing_configures: usize,
    fail_compile: bool,
    fail_install: bool,
    seen_build_dirs: Vec<String>,
}

impl RecordingToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` configure calls fail
    pub fn failing_configures(mut self, count: usize) -> Self {
        self.failing_configures = count;
        self
    }

    pub fn failing_compile(mut self) -> Self {
        self.fail_compile = true;
        self
    }

    pub fn failing_install(mut self) -> Self {
        self.fail_install = true;
        self
    }

    /// Number of configure (probe) attempts, failed ones included
    pub fn configure_calls(&self) -> usize {
        self.configure_calls
    }

    pub fn compile_calls(&self) -> usize {
        self.compile_calls
    }

    pub fn install_calls(&self) -> usize {
        self.install_calls
    }

    /// Build directories of the handles passed to compile and install, in call order
    pub fn seen_build_dirs(&self) -> &[String] {
        &self.seen_build_dirs
    }
}

impl Toolchain for RecordingToolchain {
    fn configure(&mut self, handle: &mut ConfigHandle) -> Result<()> {
        self.configure_calls += 1;
        if self.failing_configures > 0 {
            self.failing_configures -= 1;
            return Err(PkgVerError::toolchain("No CMAKE_CXX_COMPILER could be found"));
        }
        handle.record_probe("compiler", "mock-cc");
        Ok(())
    }

    fn compile_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        self.compile_calls += 1;
        self.seen_build_dirs
            .push(handle.build_dir().display().to_string());
        if self.fail_compile {
            return Err(PkgVerError::toolchain("compilation failed"));
        }
        Ok(())
    }

    fn install_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        self.install_calls += 1;
        self.seen_build_dirs
            .push(handle.build_dir().display().to_string());
        if self.fail_install {
            return Err(PkgVerError::toolchain("install failed"));
        }
        Ok(())
    }
}
