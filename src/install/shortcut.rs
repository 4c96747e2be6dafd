//! Launcher script generation for executable packages.
//!
//! A shortcut is a small script at the depot root that runs a published
//! package's main class with its resolved classpath. Unlike packages,
//! shortcuts are not version-addressed: the newest install wins the name.

use anyhow::Context;
use log::debug;
use std::path::{Path, PathBuf};

use crate::descriptor::JavaSettings;
use crate::error::InstallError;
use crate::package::ClasspathEntry;
use crate::runtime::Runtime;

#[cfg(windows)]
pub const SHORTCUT_EXTENSION: &str = "cmd";
#[cfg(not(windows))]
pub const SHORTCUT_EXTENSION: &str = "sh";

/// Get the path a shortcut of the given name lives at.
///
/// Returns: `<home>/<name>.cmd` on Windows, `<home>/<name>.sh` elsewhere.
pub fn shortcut_path(home: &Path, name: &str) -> PathBuf {
    home.join(format!("{name}.{SHORTCUT_EXTENSION}"))
}

/// Write the launcher script for the package's main class into `home`.
///
/// A no-op returning `Ok(None)` when no main class is declared - a package
/// need not be directly executable. The shortcut name falls back to
/// `default_name` (the artifact filename without its extension). Every
/// classpath entry is prefixed with the launcher's own directory so the
/// depot can be relocated wholesale, and an existing shortcut of the same
/// name is replaced unconditionally.
#[tracing::instrument(skip(runtime, java, entries))]
pub fn generate_shortcut<R: Runtime>(
    runtime: &R,
    home: &Path,
    java: Option<&JavaSettings>,
    default_name: &str,
    entries: &[ClasspathEntry],
) -> Result<Option<PathBuf>, InstallError> {
    let Some(main_class) = java
        .and_then(|java| java.main_class.as_deref())
        .filter(|main_class| !main_class.is_empty())
    else {
        debug!("No main class declared; skipping shortcut generation");
        return Ok(None);
    };

    let name = java
        .and_then(|java| java.shortcut_name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or(default_name);

    let path = shortcut_path(home, name);
    let contents = render_script(main_class, entries);
    debug!("Writing {}...", path.display());
    runtime
        .write(&path, contents.as_bytes())
        .with_context(|| format!("Failed to write shortcut at {:?}", path))?;
    runtime
        .set_permissions(&path, 0o755)
        .with_context(|| format!("Failed to mark shortcut {:?} as executable", path))?;

    Ok(Some(path))
}

#[cfg(windows)]
fn render_script(main_class: &str, entries: &[ClasspathEntry]) -> String {
    let classpath = entries
        .iter()
        .map(|entry| format!("%~dp0{}", entry.relative_path.display()))
        .collect::<Vec<_>>()
        .join(";");
    format!("@echo OFF\njava -cp {classpath} {main_class} %*\n")
}

#[cfg(not(windows))]
fn render_script(main_class: &str, entries: &[ClasspathEntry]) -> String {
    let classpath = entries
        .iter()
        .map(|entry| format!("$DEPOT_DIR/{}", entry.relative_path.display()))
        .collect::<Vec<_>>()
        .join(":");
    format!(
        "#!/bin/sh\n\
         DEPOT_DIR=$(CDPATH= cd -- \"$(dirname -- \"$0\")\" && pwd)\n\
         exec java -cp \"{classpath}\" {main_class} \"$@\"\n"
    )
}
