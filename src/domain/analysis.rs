//! Analysis result and summary types

use super::{DependencyKind, DependencyReport, SecurityFlag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// One report per declaration, in declaration order
    pub reports: Vec<DependencyReport>,
    /// Completion time of the run
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Creates a result stamped with the current time
    pub fn new(reports: Vec<DependencyReport>) -> Self {
        Self::with_timestamp(reports, Utc::now())
    }

    /// Creates a result with an explicit timestamp
    pub fn with_timestamp(reports: Vec<DependencyReport>, generated_at: DateTime<Utc>) -> Self {
        Self {
            reports,
            generated_at,
        }
    }

    /// Returns the reports declared in the given section
    pub fn reports_of(&self, kind: DependencyKind) -> impl Iterator<Item = &DependencyReport> {
        self.reports.iter().filter(move |r| r.kind == kind)
    }

    /// Returns the number of reports
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Returns true if the manifest declared nothing
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Computes summary counts
    pub fn summary(&self) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            total: self.reports.len(),
            ..AnalysisSummary::default()
        };

        for report in &self.reports {
            match report.is_outdated {
                Some(true) => summary.outdated += 1,
                Some(false) => summary.up_to_date += 1,
                None => summary.unknown += 1,
            }
            match report.security_flag {
                SecurityFlag::Deprecated => summary.deprecated += 1,
                SecurityFlag::Warning => summary.warnings += 1,
                SecurityFlag::None => {}
            }
            if report.is_fetch_failure() {
                summary.failed += 1;
            }
        }

        summary
    }

    /// Returns true if any fetch failed
    pub fn has_fetch_failures(&self) -> bool {
        self.reports.iter().any(DependencyReport::is_fetch_failure)
    }
}

/// Counts derived from an [`AnalysisResult`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total: usize,
    pub outdated: usize,
    pub up_to_date: usize,
    /// Outdated state could not be determined (includes fetch failures)
    pub unknown: usize,
    pub deprecated: usize,
    pub warnings: usize,
    pub failed: usize,
}

impl AnalysisSummary {
    /// Returns true if nothing needs attention
    pub fn is_clean(&self) -> bool {
        self.outdated == 0 && self.deprecated == 0 && self.warnings == 0 && self.failed == 0
    }

    /// Returns true if nothing needs attention and every report resolved to up to date
    pub fn all_up_to_date(&self) -> bool {
        self.is_clean() && self.unknown == 0
    }
}
