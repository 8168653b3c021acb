//! External build toolchain abstraction
//!
//! The orchestrator never spawns compilers itself; it drives a [Toolchain]
//! through three steps against a shared [ConfigHandle]:
//!
//! - [cmake::CMakeToolchain]: runs the `cmake` executable
//! - [mock::RecordingToolchain]: records calls for testing

pub mod cmake;
pub mod handle;
pub mod mock;

pub use cmake::CMakeToolchain;
pub use handle::{ConfigHandle, DISABLE_EXAMPLES, DISABLE_TESTING};
pub use mock::RecordingToolchain;

use crate::error::Result;

/// The configure/compile/install steps of an external build toolchain
///
/// Implementations report every failure as
/// [crate::error::PkgVerError::Toolchain].
pub trait Toolchain {
    /// Probe the compiler and platform and generate the build tree.
    ///
    /// May record probe results into `handle`.
    fn configure(&mut self, handle: &mut ConfigHandle) -> Result<()>;

    /// Compile every target of a configured build tree
    fn compile_all(&mut self, handle: &ConfigHandle) -> Result<()>;

    /// Install (stage) the built artifacts
    fn install_all(&mut self, handle: &ConfigHandle) -> Result<()>;
}

impl<T: Toolchain + ?Sized> Toolchain for &mut T {
    fn configure(&mut self, handle: &mut ConfigHandle) -> Result<()> {
        (**self).configure(handle)
    }

    fn compile_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        (**self).compile_all(handle)
    }

    fn install_all(&mut self, handle: &ConfigHandle) -> Result<()> {
        (**self).install_all(handle)
    }
}
