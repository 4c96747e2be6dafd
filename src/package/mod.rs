//! Package model
//!
//! This module provides the package identity value type, the
//! version-addressed depot layout, and classpath resolution over a
//! declared dependency list.

mod classpath;
mod identity;
mod repository;

pub use classpath::{
    ClasspathEntry, dependency_artifact_path, primary_artifact_path, resolve_classpath,
};
pub use identity::PackageIdentity;
pub use repository::PackageDepot;
