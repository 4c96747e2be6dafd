//! Package identity.

use std::fmt;

use crate::descriptor::{DependencyRef, ProjectDescriptor};
use crate::error::InstallError;

/// The (publisher, project, version) triple uniquely naming a package in
/// the depot.
///
/// Identities are immutable once constructed and compare field-by-field,
/// case-sensitively. Construction from descriptor data reports the first
/// missing field only, in the order project, publisher, version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentity {
    publisher: String,
    project: String,
    version: String,
}

impl PackageIdentity {
    /// Build an identity from already-validated, non-empty parts.
    pub fn new(
        publisher: impl Into<String>,
        project: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            project: project.into(),
            version: version.into(),
        }
    }

    pub fn from_descriptor(descriptor: &ProjectDescriptor) -> Result<Self, InstallError> {
        let project = descriptor.require_project()?.to_string();
        let publisher = descriptor.require_publisher()?.to_string();
        let version = descriptor.require_version()?.to_string();
        Ok(Self {
            publisher,
            project,
            version,
        })
    }

    /// Validate one entry of the declared dependency list. The field order
    /// matches [`PackageIdentity::from_descriptor`].
    pub fn from_dependency(dependency: &DependencyRef) -> Result<Self, InstallError> {
        let project = require("project", dependency.project.as_deref())?;
        let publisher = require("publisher", dependency.publisher.as_deref())?;
        let version = require("version", dependency.version.as_deref())?;
        Ok(Self {
            publisher,
            project,
            version,
        })
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Formats as the package signature `publisher/project:version`.
impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.publisher, self.project, self.version)
    }
}

fn require(field: &'static str, value: Option<&str>) -> Result<String, InstallError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(InstallError::MissingField(field)),
    }
}
