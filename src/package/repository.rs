//! Version-addressed layout of the shared package depot.
//!
//! Distinct identities map to distinct directories under the depot home;
//! that mapping is the sole mechanism preventing one published version from
//! overwriting another.

use std::path::{Path, PathBuf};

use crate::error::InstallError;
use crate::package::PackageIdentity;
use crate::runtime::Runtime;

/// The depot root and the path arithmetic over it.
pub struct PackageDepot<'a, R: Runtime> {
    runtime: &'a R,
    home: PathBuf,
}

impl<'a, R: Runtime> PackageDepot<'a, R> {
    pub fn new(runtime: &'a R, home: PathBuf) -> Self {
        Self { runtime, home }
    }

    /// Get the depot home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the directory a published version lives in.
    ///
    /// Returns: `<home>/<publisher>/<project>/<version>`
    pub fn version_dir(&self, identity: &PackageIdentity) -> PathBuf {
        self.home
            .join(identity.publisher())
            .join(identity.project())
            .join(identity.version())
    }

    /// Check whether the identity's version directory may still be created.
    ///
    /// Publishing is a pure create, never an overwrite: once a version
    /// directory exists its contents are permanent, so an existing directory
    /// fails the check regardless of what it contains. Read-only; nothing is
    /// created here.
    pub fn ensure_available(&self, identity: &PackageIdentity) -> Result<(), InstallError> {
        if self.runtime.exists(&self.version_dir(identity)) {
            return Err(InstallError::PackageAlreadyExists {
                publisher: identity.publisher().to_string(),
                project: identity.project().to_string(),
                version: identity.version().to_string(),
            });
        }
        Ok(())
    }
}
