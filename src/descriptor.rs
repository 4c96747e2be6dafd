//! Project descriptor (`project.json`) loading.
//!
//! The descriptor is consumed read-only: it names the package identity and
//! optionally a `java` block describing how to launch the built artifact.

use serde::Deserialize;
use std::path::Path;

use crate::error::InstallError;
use crate::runtime::Runtime;

/// Conventional descriptor filename at a project's root.
pub const DESCRIPTOR_FILE_NAME: &str = "project.json";

/// Conventional output folder holding the compiled artifact.
pub const OUTPUT_FOLDER_NAME: &str = "outputs";

/// File extension of the compiled artifact.
pub const ARTIFACT_EXTENSION: &str = "jar";

/// Typed view of a project's `project.json`.
///
/// The identity fields are optional at this layer so that required-field
/// checks can report the first missing field on its own rather than failing
/// the parse wholesale. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectDescriptor {
    pub project: Option<String>,
    pub publisher: Option<String>,
    pub version: Option<String>,
    pub java: Option<JavaSettings>,
}

/// Launch settings for an executable package.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JavaSettings {
    pub main_class: Option<String>,
    pub shortcut_name: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
}

/// One entry of the author-declared, ordered dependency list.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DependencyRef {
    pub publisher: Option<String>,
    pub project: Option<String>,
    pub version: Option<String>,
}

impl ProjectDescriptor {
    /// Read and parse the descriptor at `path`. Read and parse failures are
    /// both surfaced as a parse error carrying the underlying message
    /// verbatim.
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self, InstallError> {
        let contents = runtime
            .read_to_string(path)
            .map_err(|err| InstallError::DescriptorParse {
                path: path.to_path_buf(),
                message: format!("{err:#}"),
            })?;
        serde_json::from_str(&contents).map_err(|err| InstallError::DescriptorParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn require_project(&self) -> Result<&str, InstallError> {
        require("project", self.project.as_deref())
    }

    pub fn require_publisher(&self) -> Result<&str, InstallError> {
        require("publisher", self.publisher.as_deref())
    }

    pub fn require_version(&self) -> Result<&str, InstallError> {
        require("version", self.version.as_deref())
    }
}

fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, InstallError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(InstallError::MissingField(field)),
    }
}
