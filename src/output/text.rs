//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-dependency status lines with colors
//! - Runtime vs development dependency grouping
//! - Notes, repository links and fetch errors in verbose mode
//! - Summary with detailed breakdown

use crate::domain::{
    AnalysisResult, AnalysisSummary, DependencyKind, DependencyReport, SecurityFlag,
};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self::with_color(verbosity, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn is_visible(&self, report: &DependencyReport) -> bool {
        self.verbosity != Verbosity::Quiet || report.needs_attention()
    }

    fn status_label(report: &DependencyReport) -> &'static str {
        if report.is_fetch_failure() {
            return "fetch failed";
        }
        match report.is_outdated {
            Some(true) => "outdated",
            Some(false) => "up to date",
            None => "unknown",
        }
    }

    fn colored_status(report: &DependencyReport) -> String {
        let label = Self::status_label(report);
        if report.is_fetch_failure() {
            return label.red().to_string();
        }
        match report.is_outdated {
            Some(true) => label.yellow().to_string(),
            Some(false) => label.green().to_string(),
            None => label.dimmed().to_string(),
        }
    }

    fn colored_flag(flag: SecurityFlag) -> String {
        match flag {
            SecurityFlag::Deprecated => flag.label().red().bold().to_string(),
            SecurityFlag::Warning => flag.label().yellow().to_string(),
            SecurityFlag::None => String::new(),
        }
    }

    /// Format a single dependency line plus its detail lines
    fn format_report_line(
        &self,
        report: &DependencyReport,
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let latest = report.latest_version.as_deref().unwrap_or("?");
        let name_display = format!("{:width$}", report.name, width = max_name_len);

        if self.color {
            write!(
                writer,
                "  {} {} {} {} ({})",
                name_display,
                report.requested_range.dimmed(),
                "→".dimmed(),
                latest.bright_white().bold(),
                Self::colored_status(report)
            )?;
            if report.security_flag.is_flagged() {
                write!(writer, " [{}]", Self::colored_flag(report.security_flag))?;
            }
        } else {
            write!(
                writer,
                "  {} {} -> {} ({})",
                name_display,
                report.requested_range,
                latest,
                Self::status_label(report)
            )?;
            if report.security_flag.is_flagged() {
                write!(writer, " [{}]", report.security_flag)?;
            }
        }
        writeln!(writer)?;

        // Flag notes are shown at every level; the generic fetch note only in verbose
        if let Some(note) = &report.note {
            if report.security_flag.is_flagged() || self.verbosity == Verbosity::Verbose {
                self.format_detail("note", note, writer)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            if let Some(url) = &report.repository_url {
                self.format_detail("repo", url, writer)?;
            }
            if let Some(error) = &report.fetch_error {
                self.format_detail("error", error, writer)?;
            }
        }

        Ok(())
    }

    fn format_detail(
        &self,
        label: &str,
        value: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if self.color {
            writeln!(writer, "      {} {}", format!("{}:", label).dimmed(), value)
        } else {
            writeln!(writer, "      {}: {}", label, value)
        }
    }

    /// Format one manifest section
    fn format_group(
        &self,
        kind: DependencyKind,
        reports: &[&DependencyReport],
        max_name_len: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if reports.is_empty() {
            return Ok(());
        }

        let heading = format!("{} ({})", kind.display_name(), reports.len());
        if self.color {
            writeln!(writer, "{}", heading.bold())?;
        } else {
            writeln!(writer, "{}", heading)?;
        }

        for report in reports {
            self.format_report_line(report, max_name_len, writer)?;
        }
        writeln!(writer)
    }

    fn format_summary(
        &self,
        summary: &AnalysisSummary,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if summary.total == 0 {
            if self.color {
                writeln!(writer, "{}", "No dependencies declared".dimmed())?;
            } else {
                writeln!(writer, "No dependencies declared")?;
            }
            return Ok(());
        }

        if self.verbosity == Verbosity::Quiet && summary.is_clean() {
            let line = if summary.all_up_to_date() {
                "All dependencies up to date".to_string()
            } else {
                format!(
                    "Nothing needs attention ({} of {} unknown)",
                    summary.unknown, summary.total
                )
            };
            if self.color {
                writeln!(writer, "{}", line.green())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}:", "Summary".bold())?;
            writeln!(
                writer,
                "  {} checked: {} outdated, {} up to date, {} unknown",
                summary.total,
                summary.outdated.to_string().yellow(),
                summary.up_to_date.to_string().green(),
                summary.unknown.to_string().dimmed()
            )?;
        } else {
            writeln!(writer, "Summary:")?;
            writeln!(
                writer,
                "  {} checked: {} outdated, {} up to date, {} unknown",
                summary.total, summary.outdated, summary.up_to_date, summary.unknown
            )?;
        }

        let mut flags = Vec::new();
        if summary.deprecated > 0 {
            flags.push(format!("{} deprecated", summary.deprecated));
        }
        if summary.warnings > 0 {
            flags.push(format!("{} pre-release", summary.warnings));
        }
        if summary.failed > 0 {
            flags.push(format!("{} failed to fetch", summary.failed));
        }
        if !flags.is_empty() {
            let line = flags.join(", ");
            if self.color {
                writeln!(writer, "  {}", line.red())?;
            } else {
                writeln!(writer, "  {}", line)?;
            }
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &AnalysisResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let visible: Vec<&DependencyReport> =
            result.reports.iter().filter(|r| self.is_visible(r)).collect();

        let max_name_len = visible
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0)
            .max(20);

        for kind in DependencyKind::all() {
            let group: Vec<&DependencyReport> =
                visible.iter().copied().filter(|r| r.kind == *kind).collect();
            self.format_group(*kind, &group, max_name_len, writer)?;
        }

        self.format_summary(&result.summary(), writer)?;

        if self.verbosity == Verbosity::Verbose {
            let generated = format!("Generated at {}", result.generated_at.to_rfc3339());
            if self.color {
                writeln!(writer, "{}", generated.dimmed())?;
            } else {
                writeln!(writer, "{}", generated)?;
            }
        }

        Ok(())
    }
}
