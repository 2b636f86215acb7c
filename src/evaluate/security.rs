//! Security/status flag derivation

use crate::domain::{RegistryMetadata, SecurityFlag};

/// Note used when the deprecation marker carries no message
pub const GENERIC_DEPRECATION_NOTE: &str = "This version is deprecated.";

/// Note used for pre-release latest versions
pub const PRERELEASE_NOTE: &str = "Latest version is pre-release (beta/alpha/rc).";

/// Substrings that mark a version string as pre-release
const PRERELEASE_MARKERS: [&str; 3] = ["beta", "alpha", "rc"];

/// Flag and optional note for the latest release
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityAssessment {
    pub flag: SecurityFlag,
    pub note: Option<String>,
}

impl SecurityAssessment {
    fn flagged(flag: SecurityFlag, note: impl Into<String>) -> Self {
        Self {
            flag,
            note: Some(note.into()),
        }
    }
}

/// Derive the flag for `latest`; deprecation wins over pre-release.
///
/// Without a latest version nothing can be looked up and the flag is `None`.
pub fn assess(metadata: &RegistryMetadata, latest: Option<&str>) -> SecurityAssessment {
    let Some(latest) = latest else {
        return SecurityAssessment::default();
    };

    if let Some(marker) = metadata.deprecation(latest) {
        let note = marker.message().unwrap_or(GENERIC_DEPRECATION_NOTE);
        return SecurityAssessment::flagged(SecurityFlag::Deprecated, note);
    }

    if is_prerelease(latest) {
        return SecurityAssessment::flagged(SecurityFlag::Warning, PRERELEASE_NOTE);
    }

    SecurityAssessment::default()
}

/// Case-sensitive substring test, not a semver pre-release parse
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE_MARKERS.iter().any(|marker| version.contains(marker))
}
