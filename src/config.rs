//! Install-time configuration, resolved once at startup.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Directory name of the default depot under the user's home directory.
const DEFAULT_DEPOT_DIR: &str = ".depot";

/// Everything the install pipeline needs to know up front. Populated once
/// from the CLI and environment; no field defaults lazily afterwards.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Shared depot root (`--home` / `DEPOT_HOME`, default `~/.depot`).
    pub home: PathBuf,
    /// Project folder to install from (default: the current directory).
    pub folder: PathBuf,
    /// Emit per-step copy notices.
    pub verbose: bool,
    /// Print the total wall-clock duration when the run finishes.
    /// Defaults to true; library callers may turn it off.
    pub show_total_duration: bool,
}

impl InstallConfig {
    /// Resolve the configuration. The named `--folder` flag wins over the
    /// positional folder argument; a relative folder is resolved against
    /// the current directory.
    pub fn resolve<R: Runtime>(
        runtime: &R,
        home: Option<PathBuf>,
        folder_flag: Option<PathBuf>,
        folder_positional: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => runtime
                .home_dir()
                .context("Could not determine a home directory for the package depot")?
                .join(DEFAULT_DEPOT_DIR),
        };

        let folder = match folder_flag.or(folder_positional) {
            Some(folder) if folder.is_absolute() => folder,
            Some(folder) => runtime.current_dir()?.join(folder),
            None => runtime.current_dir()?,
        };

        Ok(Self {
            home,
            folder,
            verbose,
            show_total_duration: true,
        })
    }
}
