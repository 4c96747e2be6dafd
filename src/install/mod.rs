//! Install orchestration: gate on the external build/test pipeline,
//! validate the descriptor, guard the target version, publish, and generate
//! the shortcut.
//!
//! The pipeline is linear and synchronous. Every failure is translated into
//! exactly one operator-facing message at the point it is first detected,
//! and no later step runs after a failure.

mod publish;
mod shortcut;

pub use publish::{PublishedArtifact, publish};
pub use shortcut::{SHORTCUT_EXTENSION, generate_shortcut, shortcut_path};

use log::info;
use std::path::PathBuf;

use crate::config::InstallConfig;
use crate::descriptor::{
    ARTIFACT_EXTENSION, DESCRIPTOR_FILE_NAME, OUTPUT_FOLDER_NAME, ProjectDescriptor,
};
use crate::error::InstallError;
use crate::package::{PackageDepot, PackageIdentity, primary_artifact_path, resolve_classpath};
use crate::pipeline::BuildPipeline;
use crate::runtime::Runtime;

/// Terminal outcome of a successful install attempt.
#[derive(Debug)]
pub struct InstallReport {
    pub identity: PackageIdentity,
    pub installed_dir: PathBuf,
    pub shortcut: Option<PathBuf>,
}

struct ValidatedProject {
    identity: PackageIdentity,
    artifact_file: PathBuf,
    dependencies: Vec<PackageIdentity>,
}

/// Sequences one install of the configured project folder. The build/test
/// pipeline and the system runtime are injected; the orchestrator holds no
/// other state.
pub struct Installer<'a, R: Runtime, P: BuildPipeline> {
    runtime: &'a R,
    pipeline: &'a P,
    config: &'a InstallConfig,
}

impl<'a, R: Runtime, P: BuildPipeline> Installer<'a, R, P> {
    pub fn new(runtime: &'a R, pipeline: &'a P, config: &'a InstallConfig) -> Self {
        Self {
            runtime,
            pipeline,
            config,
        }
    }

    /// Run the full install pipeline for the configured project folder.
    ///
    /// Nothing is written under the depot before the upstream pipeline has
    /// passed, the descriptor has validated, and the target version has
    /// been confirmed absent.
    #[tracing::instrument(skip(self))]
    pub fn install(&self) -> Result<InstallReport, InstallError> {
        let status = self.pipeline.run(&self.config.folder)?;
        if !status.passed() {
            return Err(InstallError::BuildOrTestFailure {
                status: status.code,
            });
        }

        println!("Installing...");

        let descriptor_file = self.config.folder.join(DESCRIPTOR_FILE_NAME);
        let descriptor = ProjectDescriptor::load(self.runtime, &descriptor_file)?;
        let validated = self.validate(&descriptor)?;

        let depot = PackageDepot::new(self.runtime, self.config.home.clone());
        depot.ensure_available(&validated.identity)?;

        let target_dir = depot.version_dir(&validated.identity);
        publish(
            self.runtime,
            &descriptor_file,
            &validated.artifact_file,
            &target_dir,
        )?;

        let entries = resolve_classpath(
            primary_artifact_path(&validated.identity),
            &validated.dependencies,
        );
        let shortcut = generate_shortcut(
            self.runtime,
            depot.home(),
            descriptor.java.as_ref(),
            validated.identity.project(),
            &entries,
        )?;

        info!("Installed {} at {}", validated.identity, target_dir.display());
        Ok(InstallReport {
            identity: validated.identity,
            installed_dir: target_dir,
            shortcut,
        })
    }

    /// Ordered validation chain over the descriptor. The check order is part
    /// of the user-facing contract: project, then the compiled artifact,
    /// then publisher, then version, then each declared dependency; the
    /// first failure is reported alone.
    fn validate(&self, descriptor: &ProjectDescriptor) -> Result<ValidatedProject, InstallError> {
        let project = descriptor.require_project()?.to_string();

        let artifact_file = self
            .config
            .folder
            .join(OUTPUT_FOLDER_NAME)
            .join(format!("{project}.{ARTIFACT_EXTENSION}"));
        if !self.runtime.exists(&artifact_file) {
            return Err(InstallError::ArtifactNotFound(artifact_file));
        }

        let publisher = descriptor.require_publisher()?.to_string();
        let version = descriptor.require_version()?.to_string();
        let identity = PackageIdentity::new(publisher, project, version);

        let mut dependencies = Vec::new();
        if let Some(java) = &descriptor.java {
            for dependency in &java.dependencies {
                dependencies.push(PackageIdentity::from_dependency(dependency)?);
            }
        }

        Ok(ValidatedProject {
            identity,
            artifact_file,
            dependencies,
        })
    }
}
