//! package.json parser
//!
//! Reads the `dependencies` and `devDependencies` sections. Ranges are kept
//! verbatim; whether they are valid npm ranges is decided later by the
//! evaluator. Only text that is not JSON is an error: sections of the wrong
//! shape are treated as absent and non-string ranges are kept as their JSON
//! text, so one odd entry never hides the others.

use crate::domain::{DependencyDeclaration, DependencyKind};
use crate::error::ManifestError;
use crate::manifest::ManifestDependencies;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::warn;

/// Parser for package.json text
#[derive(Debug, Clone)]
pub struct PackageJsonParser {
    /// Path used in error messages
    path: PathBuf,
}

impl PackageJsonParser {
    /// Create a parser that reports errors against `package.json`
    pub fn new() -> Self {
        Self::with_path(super::MANIFEST_FILENAME)
    }

    /// Create a parser that reports errors against the given path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse manifest text into its dependency sections
    pub fn parse(&self, content: &str) -> Result<ManifestDependencies, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(&self.path, e.to_string()))?;

        let Some(root) = json.as_object() else {
            warn!(path = %self.path.display(), "manifest root is not an object");
            return Ok(ManifestDependencies::default());
        };

        Ok(ManifestDependencies {
            runtime: self.parse_section(root, DependencyKind::Runtime),
            development: self.parse_section(root, DependencyKind::Development),
        })
    }

    fn parse_section(
        &self,
        root: &Map<String, Value>,
        kind: DependencyKind,
    ) -> Vec<DependencyDeclaration> {
        let section = kind.manifest_key();
        let deps = match root.get(section) {
            None | Some(Value::Null) => return Vec::new(),
            Some(Value::Object(deps)) => deps,
            Some(_) => {
                warn!(path = %self.path.display(), section, "section is not an object, ignoring");
                return Vec::new();
            }
        };

        deps.iter()
            .map(|(name, range)| {
                let range = match range {
                    Value::String(range) => range.clone(),
                    other => {
                        warn!(package = %name, section, "version range is not a string");
                        other.to_string()
                    }
                };
                DependencyDeclaration::new(name, range, kind)
            })
            .collect()
    }
}

impl Default for PackageJsonParser {
    fn default() -> Self {
        Self::new()
    }
}
