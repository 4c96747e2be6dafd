//! Classpath resolution over the declared dependency list.
//!
//! Pure path arithmetic: nothing here touches the filesystem, and a
//! dependency whose artifact was never published only surfaces when the
//! generated shortcut is run.

use std::path::PathBuf;

use crate::package::PackageIdentity;

/// One depot-relative artifact location on the launch classpath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClasspathEntry {
    pub relative_path: PathBuf,
}

/// Depot-relative location of a published primary artifact:
/// `<publisher>/<project>/<version>/<project>.jar`.
pub fn primary_artifact_path(identity: &PackageIdentity) -> PathBuf {
    PathBuf::from(identity.publisher())
        .join(identity.project())
        .join(identity.version())
        .join(format!(
            "{}.{}",
            identity.project(),
            crate::descriptor::ARTIFACT_EXTENSION
        ))
}

/// The conventional artifact location of a declared dependency, relative to
/// the depot home: `<publisher>/<project>/<version>/<project>`.
pub fn dependency_artifact_path(identity: &PackageIdentity) -> PathBuf {
    PathBuf::from(identity.publisher())
        .join(identity.project())
        .join(identity.version())
        .join(identity.project())
}

/// Resolve the launch classpath: the primary artifact first, then each
/// declared dependency in declaration order.
///
/// Resolution is one level deep - the dependency list is taken as the
/// author curated it, so dependencies' own dependencies are not consulted
/// and the same project declared at two versions yields two entries. Only
/// an exactly repeated path is dropped (first occurrence wins).
pub fn resolve_classpath(
    primary_artifact: PathBuf,
    dependencies: &[PackageIdentity],
) -> Vec<ClasspathEntry> {
    let mut entries: Vec<ClasspathEntry> = Vec::with_capacity(dependencies.len() + 1);
    push_unique(&mut entries, primary_artifact);
    for dependency in dependencies {
        push_unique(&mut entries, dependency_artifact_path(dependency));
    }
    entries
}

fn push_unique(entries: &mut Vec<ClasspathEntry>, relative_path: PathBuf) {
    if !entries.iter().any(|entry| entry.relative_path == relative_path) {
        entries.push(ClasspathEntry { relative_path });
    }
}
