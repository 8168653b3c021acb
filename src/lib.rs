pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod orchestrator;
pub mod recipe;
pub mod resolver;
pub mod toolchain;
pub mod ui;

pub use error::{PkgVerError, Result};
pub use orchestrator::{BuildOrchestrator, OrchestratorState};
pub use recipe::PackageRecipe;
pub use resolver::{resolve_version, VersionResolver};
