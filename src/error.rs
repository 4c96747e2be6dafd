//! Failure taxonomy for the install pipeline.
//!
//! Every variant carries the exact operator-facing message. A failure is
//! terminal for the current install attempt: the pipeline reports it once
//! and halts, it never retries a step.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    /// The upstream build/test pipeline did not pass; install never starts.
    #[error("The build/test pipeline failed with exit status {status}.")]
    BuildOrTestFailure { status: i32 },

    /// The project descriptor could not be read or parsed.
    #[error("Failed to parse {}: {message}", .path.display())]
    DescriptorParse { path: PathBuf, message: String },

    /// A required descriptor property is absent or empty. Carries the name
    /// of the first missing field only.
    #[error("A {0} property must be specified in the project.json file.")]
    MissingField(&'static str),

    /// No compiled artifact at the conventional output location.
    #[error("Couldn't find a compiled project jar file at {}.", .0.display())]
    ArtifactNotFound(PathBuf),

    /// The target version directory already exists. Published versions are
    /// immutable; installing is a create, never an overwrite.
    #[error(
        "This package ({publisher}/{project}:{version}) can't be installed \
         because a package with that signature already exists."
    )]
    PackageAlreadyExists {
        publisher: String,
        project: String,
        version: String,
    },

    /// A filesystem operation failed during publish or shortcut generation.
    #[error("{0:#}")]
    Io(anyhow::Error),
}

impl From<anyhow::Error> for InstallError {
    fn from(err: anyhow::Error) -> Self {
        InstallError::Io(err)
    }
}

impl InstallError {
    /// Process exit status for this failure. A pipeline failure propagates
    /// the upstream status so error counts aggregate across the whole
    /// build/test/install run; everything else counts as one error.
    pub fn exit_status(&self) -> i32 {
        match self {
            InstallError::BuildOrTestFailure { status } if *status > 0 => *status,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
