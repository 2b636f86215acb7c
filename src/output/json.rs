//! JSON output formatter for machine processing

use crate::domain::{AnalysisResult, AnalysisSummary, DependencyReport};
use crate::output::{OutputFormatter, Verbosity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode drops reports that need no attention
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    generated_at: DateTime<Utc>,
    /// Counts always cover every report, even in quiet mode
    summary: AnalysisSummary,
    reports: Vec<&'a DependencyReport>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let reports = result
            .reports
            .iter()
            .filter(|r| self.verbosity != Verbosity::Quiet || r.needs_attention())
            .collect();

        let output = JsonOutput {
            generated_at: result.generated_at,
            summary: result.summary(),
            reports,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
