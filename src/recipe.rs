//! Package lifecycle surface consumed by a host packaging tool
//!
//! A [PackageRecipe] ties together the manifest, the version resolver and
//! the build orchestrator behind the hooks a packaging tool calls:
//! name, version, build, package and the list of produced libraries.

use crate::boundary::{check_identity, IdentityWarning};
use crate::config::Config;
use crate::domain::manifest::read_manifest;
use crate::domain::{ProjectDeclaration, ProjectName, ResolvedVersion};
use crate::error::Result;
use crate::git::{Git2Repository, VcsQuery};
use crate::orchestrator::BuildOrchestrator;
use crate::resolver::{resolve_from, VersionResolver};
use crate::toolchain::{CMakeToolchain, Toolchain};
use std::path::{Path, PathBuf};
use tracing::info;

/// Descriptive package metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackageMetadata {
    pub license: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// Everything known about a package's identity at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct PackageIdentity {
    pub name: ProjectName,
    pub version: ResolvedVersion,
    /// VERSION literal from the manifest, if any
    pub manifest_version: Option<String>,
    pub artifacts: Vec<String>,
    pub warnings: Vec<IdentityWarning>,
}

pub struct PackageRecipe<R: VcsQuery, T: Toolchain> {
    manifest_path: PathBuf,
    resolver: VersionResolver<R>,
    orchestrator: BuildOrchestrator<T>,
    metadata: PackageMetadata,
    libs: Vec<String>,
    dirty_marker: String,
}

impl PackageRecipe<Git2Repository, CMakeToolchain> {
    /// Recipe for the source tree at `root`, backed by its git repository and cmake
    pub fn open<P: AsRef<Path>>(root: P, config: &Config) -> Result<Self> {
        let repo = Git2Repository::open(root.as_ref())?
            .with_dirty_suffix(config.version.dirty_marker.clone());
        let toolchain = CMakeToolchain::new(config.build.cmake.clone());
        Ok(Self::new(root, config, repo, toolchain))
    }
}

impl<R: VcsQuery, T: Toolchain> PackageRecipe<R, T> {
    /// Assemble a recipe from explicit collaborators
    pub fn new<P: AsRef<Path>>(root: P, config: &Config, repo: R, toolchain: T) -> Self {
        let root = root.as_ref();
        PackageRecipe {
            manifest_path: root.join(&config.package.manifest),
            resolver: VersionResolver::new(repo)
                .with_dirty_marker(config.version.dirty_marker.clone()),
            orchestrator: BuildOrchestrator::new(toolchain, root, config.build.clone()),
            metadata: PackageMetadata {
                license: config.package.license.clone(),
                description: config.package.description.clone(),
                url: config.package.url.clone(),
            },
            libs: config.package.libs.clone(),
            dirty_marker: config.version.dirty_marker.clone(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    pub fn orchestrator(&self) -> &BuildOrchestrator<T> {
        &self.orchestrator
    }

    /// The manifest's project declaration, read fresh from disk
    pub fn declaration(&self) -> Result<ProjectDeclaration> {
        read_manifest(&self.manifest_path)
    }

    /// Package name from the manifest
    pub fn name(&self) -> Result<ProjectName> {
        self.declaration().map(|decl| decl.name)
    }

    /// Package version from tag history; recomputed on every call
    pub fn version(&self) -> Result<ResolvedVersion> {
        self.resolver.resolve()
    }

    pub fn build(&mut self) -> Result<()> {
        info!("building package");
        self.orchestrator.build()
    }

    pub fn package(&mut self) -> Result<()> {
        info!("packaging");
        self.orchestrator.package()
    }

    /// Library artifacts the package provides.
    ///
    /// Configured `libs` win; otherwise the single library is named after
    /// the project.
    pub fn describe_artifacts(&self) -> Result<Vec<String>> {
        if !self.libs.is_empty() {
            return Ok(self.libs.clone());
        }
        Ok(vec![self.name()?.to_string()])
    }

    /// Name, version, artifacts and identity warnings in one pass
    pub fn identity(&self) -> Result<PackageIdentity> {
        let declaration = self.declaration()?;
        let info = self.resolver.describe()?;
        let version = resolve_from(&info, &self.dirty_marker)?;
        let warnings = check_identity(&declaration, &info, &version, &self.dirty_marker);

        let artifacts = if self.libs.is_empty() {
            vec![declaration.name.to_string()]
        } else {
            self.libs.clone()
        };

        Ok(PackageIdentity {
            name: declaration.name,
            version,
            manifest_version: declaration.version,
            artifacts,
            warnings,
        })
    }
}
