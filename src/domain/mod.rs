//! Domain logic - pure rules independent of git and toolchain access

pub mod describe;
pub mod manifest;
pub mod version;

pub use describe::DescribeInfo;
pub use manifest::{extract_declaration, extract_name, ProjectDeclaration, ProjectName};
pub use version::{ResolvedVersion, SemverComponents};
