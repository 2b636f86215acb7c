//! Version evaluation for fetched metadata
//!
//! This module provides:
//! - Outdated check of the `latest` tag against the requested npm range
//! - Deprecation / pre-release flag derivation
//! - Repository URL normalization
//!
//! Missing or malformed fields never produce an error here; they degrade to
//! "unknown" (`None`) or `SecurityFlag::None`.

mod outdated;
mod repository;
mod security;

pub use outdated::is_outdated;
pub use repository::normalize_repository_url;
pub use security::{
    assess, is_prerelease, SecurityAssessment, GENERIC_DEPRECATION_NOTE, PRERELEASE_NOTE,
};

use crate::domain::{DependencyDeclaration, DependencyReport, RegistryMetadata, SecurityFlag};

/// Everything derived from one package's metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Version behind the `latest` tag
    pub latest_version: Option<String>,
    /// `None` when the versions could not be compared
    pub is_outdated: Option<bool>,
    pub security_flag: SecurityFlag,
    pub note: Option<String>,
    pub repository_url: Option<String>,
}

impl Evaluation {
    /// Combine with the declaration's identity fields
    pub fn into_report(self, declaration: &DependencyDeclaration) -> DependencyReport {
        DependencyReport {
            latest_version: self.latest_version,
            is_outdated: self.is_outdated,
            security_flag: self.security_flag,
            note: self.note,
            repository_url: self.repository_url,
            ..DependencyReport::unknown(declaration)
        }
    }
}

/// Evaluate a package's metadata against the requested range
pub fn evaluate(metadata: &RegistryMetadata, requested_range: &str) -> Evaluation {
    let latest = metadata.latest_version();

    let is_outdated = latest.and_then(|latest| outdated::is_outdated(latest, requested_range));
    let SecurityAssessment { flag, note } = security::assess(metadata, latest);
    let repository_url = metadata.repository_url().map(normalize_repository_url);

    Evaluation {
        latest_version: latest.map(str::to_string),
        is_outdated,
        security_flag: flag,
        note,
        repository_url,
    }
}
