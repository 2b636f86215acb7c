//! Dependency declaration structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Manifest section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// `dependencies`
    Runtime,
    /// `devDependencies`
    Development,
}

impl DependencyKind {
    /// Returns the manifest key for this section
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Development => "devDependencies",
        }
    }

    /// Returns a heading suitable for display
    pub fn display_name(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "Dependencies",
            DependencyKind::Development => "Dev dependencies",
        }
    }

    /// All kinds in report order
    pub fn all() -> &'static [DependencyKind] {
        &[DependencyKind::Runtime, DependencyKind::Development]
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyKind::Runtime => write!(f, "runtime"),
            DependencyKind::Development => write!(f, "development"),
        }
    }
}

/// A dependency as declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyDeclaration {
    /// Package name
    pub name: String,
    /// Version range exactly as written in the manifest
    pub requested_range: String,
    /// Which manifest section declared it
    #[serde(rename = "category")]
    pub kind: DependencyKind,
}

impl DependencyDeclaration {
    /// Creates a new declaration
    pub fn new(
        name: impl Into<String>,
        requested_range: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            name: name.into(),
            requested_range: requested_range.into(),
            kind,
        }
    }

    /// Creates a new runtime declaration
    pub fn runtime(name: impl Into<String>, requested_range: impl Into<String>) -> Self {
        Self::new(name, requested_range, DependencyKind::Runtime)
    }

    /// Creates a new development declaration
    pub fn development(name: impl Into<String>, requested_range: impl Into<String>) -> Self {
        Self::new(name, requested_range, DependencyKind::Development)
    }

    /// Returns true if declared under `devDependencies`
    pub fn is_dev(&self) -> bool {
        self.kind == DependencyKind::Development
    }
}

impl fmt::Display for DependencyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev() { " (dev)" } else { "" };
        write!(f, "{}@{}{}", self.name, self.requested_range, dev_marker)
    }
}
