//! Copies a project's descriptor and artifact into its version directory.

use anyhow::Context;
use log::debug;
use std::path::{Path, PathBuf};

use crate::descriptor::DESCRIPTOR_FILE_NAME;
use crate::error::InstallError;
use crate::runtime::Runtime;

/// Locations of the two files a successful publish leaves behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub descriptor: PathBuf,
    pub artifact: PathBuf,
}

/// Create `target_dir` (with parents) and copy the descriptor and the
/// artifact into it, keeping the artifact's original filename.
///
/// The caller must have passed the availability check on `target_dir` and
/// verified that `artifact_file` exists. The two copies are not
/// transactional: if the second fails the directory is left partially
/// populated and the failure is surfaced, nothing is rolled back.
#[tracing::instrument(skip(runtime))]
pub fn publish<R: Runtime>(
    runtime: &R,
    descriptor_file: &Path,
    artifact_file: &Path,
    target_dir: &Path,
) -> Result<PublishedArtifact, InstallError> {
    runtime
        .create_dir_all(target_dir)
        .with_context(|| format!("Failed to create target directory at {:?}", target_dir))?;

    let installed_descriptor = target_dir.join(DESCRIPTOR_FILE_NAME);
    debug!(
        "Copying {} to {}...",
        descriptor_file.display(),
        installed_descriptor.display()
    );
    runtime
        .copy(descriptor_file, &installed_descriptor)
        .with_context(|| format!("Failed to copy {:?} to {:?}", descriptor_file, installed_descriptor))?;

    let artifact_name = artifact_file
        .file_name()
        .context("Artifact file has no filename")?;
    let installed_artifact = target_dir.join(artifact_name);
    debug!(
        "Copying {} to {}...",
        artifact_file.display(),
        installed_artifact.display()
    );
    runtime
        .copy(artifact_file, &installed_artifact)
        .with_context(|| format!("Failed to copy {:?} to {:?}", artifact_file, installed_artifact))?;

    Ok(PublishedArtifact {
        descriptor: installed_descriptor,
        artifact: installed_artifact,
    })
}
