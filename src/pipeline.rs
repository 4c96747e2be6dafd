//! External build/test pipeline gate.
//!
//! Install is the last stage of a build/test/install toolchain. The stages
//! before it are collaborators behind the [`BuildPipeline`] trait: all this
//! crate needs from them is an exit status.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

use crate::runtime::Runtime;

/// Environment variable naming the command that builds and tests a project
/// before it may be installed.
pub const PIPELINE_ENV_VAR: &str = "DEPOT_PIPELINE";

/// Exit status reported by the upstream pipeline. Zero means passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStatus {
    pub code: i32,
}

impl PipelineStatus {
    pub fn passed(self) -> bool {
        self.code == 0
    }
}

/// The build/test stages that must pass before an install may begin.
#[cfg_attr(test, mockall::automock)]
pub trait BuildPipeline {
    fn run(&self, project_dir: &Path) -> Result<PipelineStatus>;
}

/// Runs a configured command line in the project folder, blocking until it
/// exits, and reports its status. With no command configured the gate
/// passes without running anything - the project is taken as already built
/// and tested, and the artifact existence check still guards the install.
pub struct CommandPipeline {
    command: Option<Vec<String>>,
}

impl CommandPipeline {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self { command }
    }

    /// Build the pipeline from `DEPOT_PIPELINE` (whitespace-split argv).
    pub fn from_env<R: Runtime>(runtime: &R) -> Self {
        let command = runtime
            .env_var(PIPELINE_ENV_VAR)
            .ok()
            .map(|value| value.split_whitespace().map(String::from).collect())
            .filter(|argv: &Vec<String>| !argv.is_empty());
        Self::new(command)
    }
}

impl BuildPipeline for CommandPipeline {
    #[tracing::instrument(skip(self, project_dir))]
    fn run(&self, project_dir: &Path) -> Result<PipelineStatus> {
        let Some(argv) = &self.command else {
            log::debug!("No pipeline command configured; skipping build/test gate");
            return Ok(PipelineStatus { code: 0 });
        };
        let (program, args) = argv
            .split_first()
            .context("Pipeline command is empty")?;

        log::debug!("Running pipeline command {argv:?} in {}", project_dir.display());
        let status = Command::new(program)
            .args(args)
            .current_dir(project_dir)
            .status()
            .with_context(|| format!("Failed to run pipeline command {program:?}"))?;

        // A signal-terminated child has no code; report it as a failure.
        Ok(PipelineStatus {
            code: status.code().unwrap_or(-1),
        })
    }
}
