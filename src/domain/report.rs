//! Per-dependency report types

use super::{DependencyDeclaration, DependencyKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Note attached to a report whose metadata could not be fetched
pub const FETCH_FAILED_NOTE: &str = "Failed to fetch metadata";

/// Security/status flag derived from the latest release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityFlag {
    /// Nothing to report
    #[default]
    None,
    /// Latest release is deprecated
    Deprecated,
    /// Latest release looks like a pre-release
    Warning,
}

impl SecurityFlag {
    /// Returns a short display label
    pub fn label(&self) -> &'static str {
        match self {
            SecurityFlag::None => "none",
            SecurityFlag::Deprecated => "deprecated",
            SecurityFlag::Warning => "warning",
        }
    }

    /// Returns true for anything other than `None`
    pub fn is_flagged(&self) -> bool {
        *self != SecurityFlag::None
    }
}

impl fmt::Display for SecurityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Analysis outcome for one declared dependency.
///
/// `latest_version` and `is_outdated` are `None` when the answer is
/// unknown (fetch failed, no `latest` tag, or unparseable versions).
/// They are never defaulted to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    /// Package name
    pub name: String,
    /// Manifest section
    #[serde(rename = "category")]
    pub kind: DependencyKind,
    /// Range as written in the manifest
    pub requested_range: String,
    /// Version behind the registry's `latest` tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    /// Whether `latest_version` falls outside `requested_range`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_outdated: Option<bool>,
    /// Deprecation / pre-release flag
    pub security_flag: SecurityFlag,
    /// Human-readable explanation of the flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Browsable repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Underlying fetch error, for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl DependencyReport {
    /// Creates a report with every derived field unknown
    pub fn unknown(declaration: &DependencyDeclaration) -> Self {
        Self {
            name: declaration.name.clone(),
            kind: declaration.kind,
            requested_range: declaration.requested_range.clone(),
            latest_version: None,
            is_outdated: None,
            security_flag: SecurityFlag::None,
            note: None,
            repository_url: None,
            fetch_error: None,
        }
    }

    /// Creates the degraded report used when the metadata fetch failed
    pub fn fetch_failed(declaration: &DependencyDeclaration, error: impl Into<String>) -> Self {
        Self {
            note: Some(FETCH_FAILED_NOTE.to_string()),
            fetch_error: Some(error.into()),
            ..Self::unknown(declaration)
        }
    }

    /// Returns true if the metadata fetch failed
    pub fn is_fetch_failure(&self) -> bool {
        self.fetch_error.is_some()
    }

    /// Returns true if confirmed outdated
    pub fn is_outdated(&self) -> bool {
        self.is_outdated == Some(true)
    }

    /// Returns true if confirmed within the requested range
    pub fn is_up_to_date(&self) -> bool {
        self.is_outdated == Some(false)
    }

    /// Returns true if anything about this dependency needs attention
    pub fn needs_attention(&self) -> bool {
        self.is_outdated() || self.security_flag.is_flagged() || self.is_fetch_failure()
    }
}

impl fmt::Display for DependencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latest = self.latest_version.as_deref().unwrap_or("?");
        let status = match self.is_outdated {
            Some(true) => "outdated",
            Some(false) => "up to date",
            None => "unknown",
        };
        write!(f, "{}: {} → {} ({})", self.name, self.requested_range, latest, status)?;
        if self.security_flag.is_flagged() {
            write!(f, " [{}]", self.security_flag)?;
        }
        Ok(())
    }
}
