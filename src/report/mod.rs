//! Report generation with multiple output formats
//!
//! Architecture: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - Human output is the plain text contract: one line per finding, nothing when clean
//! - JSON and GitHub annotations carry the same findings for tooling

use crate::domain::violations::{BurnerError, BurnerResult, ValidationReport, Violation};
use crate::pruner::PruneReport;
use serde_json::Value as JsonValue;
use std::io::Write;

/// Supported output formats for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text, one line per violation
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions format for workflow integration
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Maximum number of violations to include
    pub max_violations: Option<usize>,
}

/// Report formatter for validation and prune results
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_validation(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> BurnerResult<String> {
        let violations = self.limit_violations(&report.violations);

        match format {
            OutputFormat::Human => Ok(self.format_human(&violations)),
            OutputFormat::Json => self.format_json(report, &violations),
            OutputFormat::GitHub => Ok(self.format_github(report, &violations)),
        }
    }

    /// Write a formatted validation report to a writer
    pub fn write_validation<W: Write>(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> BurnerResult<()> {
        let formatted = self.format_validation(report, format)?;
        writer.write_all(formatted.as_bytes())?;
        Ok(())
    }

    /// Format a prune report; GitHub annotations make no sense here and fall back to human
    pub fn format_prune(&self, report: &PruneReport, format: OutputFormat) -> BurnerResult<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| BurnerError::serialization(format!("JSON serialization failed: {e}"))),
            OutputFormat::Human | OutputFormat::GitHub => {
                let mut output = String::from(Self::prune_header());
                for domain in &report.removed {
                    output.push_str(&Self::prune_removed_line(domain));
                }
                output.push_str(&Self::prune_footer(report));
                Ok(output)
            }
        }
    }

    /// First line of human prune output, printed before any domain is checked
    pub fn prune_header() -> &'static str {
        "Domains to remove:\n"
    }

    pub fn prune_removed_line(domain: &str) -> String {
        format!("    {domain}\n")
    }

    /// Removal count followed by the list to keep
    pub fn prune_footer(report: &PruneReport) -> String {
        let mut output = format!(
            "Removed {} old domains, new valid list:\n\n",
            report.removed.len()
        );
        for domain in &report.kept {
            output.push_str(domain);
            output.push('\n');
        }
        output
    }

    fn limit_violations<'a>(&self, violations: &'a [Violation]) -> Vec<&'a Violation> {
        let mut limited: Vec<&Violation> = violations.iter().collect();
        if let Some(max) = self.options.max_violations {
            limited.truncate(max);
        }
        limited
    }

    fn format_human(&self, violations: &[&Violation]) -> String {
        let mut output = String::new();
        for violation in violations {
            output.push_str(&violation.format_display());
            output.push('\n');
        }
        output
    }

    fn format_json(
        &self,
        report: &ValidationReport,
        violations: &[&Violation],
    ) -> BurnerResult<String> {
        let json_violations: Vec<JsonValue> = violations
            .iter()
            .map(|v| {
                serde_json::json!({
                    "rule_id": v.kind.rule_id(),
                    "line_number": v.line_number,
                    "domain": v.domain,
                    "message": v.message,
                })
            })
            .collect();

        let counts = &report.summary.violations_by_kind;
        let json_report = serde_json::json!({
            "source": report.source.as_ref().map(|p| p.display().to_string()),
            "violations": json_violations,
            "summary": {
                "total_entries": report.summary.total_entries,
                "violations_by_kind": {
                    "duplicate_entry": counts.duplicate_entry,
                    "wrong_sorting": counts.wrong_sorting,
                    "invalid_domain": counts.invalid_domain,
                },
                "execution_time_ms": report.summary.execution_time_ms,
                "validated_at": report.summary.validated_at.to_rfc3339(),
            }
        });

        serde_json::to_string_pretty(&json_report)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| BurnerError::serialization(format!("JSON serialization failed: {e}")))
    }

    fn format_github(&self, report: &ValidationReport, violations: &[&Violation]) -> String {
        let file = report
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "emails.txt".to_string());

        let mut output = String::new();
        for violation in violations {
            output.push_str(&format!(
                "::error file={},line={},title={}::{}\n",
                file,
                violation.line_number,
                violation.kind.rule_id(),
                violation.message
            ));
        }
        output
    }
}
