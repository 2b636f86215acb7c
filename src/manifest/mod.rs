//! Manifest reading and parsing
//!
//! This module provides functionality to:
//! - Locate `package.json` from a file or directory path
//! - Parse runtime and development dependency sections
//! - Flatten them into the ordered declaration list the orchestrator consumes
//! - Filter declarations by section and package name

mod filter;
mod package_json;

pub use filter::DeclarationFilter;
pub use package_json::PackageJsonParser;

use crate::domain::DependencyDeclaration;
use crate::error::ManifestError;
use std::path::{Path, PathBuf};

/// Manifest file name looked up inside a directory
pub const MANIFEST_FILENAME: &str = "package.json";

/// Dependencies declared by a manifest, split by section.
///
/// Each list keeps the order the entries appear in the manifest text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDependencies {
    /// Entries of `dependencies`
    pub runtime: Vec<DependencyDeclaration>,
    /// Entries of `devDependencies`
    pub development: Vec<DependencyDeclaration>,
}

impl ManifestDependencies {
    /// Returns all declarations, runtime first, then development
    pub fn declarations(&self) -> Vec<DependencyDeclaration> {
        self.runtime
            .iter()
            .chain(self.development.iter())
            .cloned()
            .collect()
    }

    /// Total number of declarations across both sections
    pub fn len(&self) -> usize {
        self.runtime.len() + self.development.len()
    }

    /// Returns true if neither section declares anything
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse manifest text
pub fn parse_manifest(content: &str) -> Result<ManifestDependencies, ManifestError> {
    PackageJsonParser::new().parse(content)
}

/// Resolve a user-supplied path to the manifest file.
///
/// Directories resolve to the `package.json` inside them.
pub fn resolve_manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILENAME)
    } else {
        path.to_path_buf()
    }
}

/// Read and parse the manifest at a file or directory path
pub fn read_manifest(path: &Path) -> Result<ManifestDependencies, ManifestError> {
    let manifest_path = resolve_manifest_path(path);

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(&manifest_path)
        } else {
            ManifestError::read_error(&manifest_path, e)
        }
    })?;

    PackageJsonParser::with_path(manifest_path).parse(&content)
}
