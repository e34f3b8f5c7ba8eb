//! Core domain models for list violations and validation results
//!
//! Architecture: Rich Domain Models - Violations know their rule and render their own message
//! - ValidationReport acts as an aggregate root over the violations of one list pass
//! - Violations keep discovery order; nothing re-sorts them after the pass

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The three invariants a burner list must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The entry already appeared earlier in the list
    DuplicateEntry,
    /// The entry sorts before the line right above it
    WrongSorting,
    /// The entry has no registrable domain or no public suffix
    InvalidDomain,
}

impl ViolationKind {
    /// Stable rule identifier used in machine-readable output
    pub fn rule_id(self) -> &'static str {
        match self {
            Self::DuplicateEntry => "duplicate_entry",
            Self::WrongSorting => "wrong_sorting",
            Self::InvalidDomain => "invalid_domain",
        }
    }
}

/// A single broken invariant found while walking the list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Which invariant was broken
    pub kind: ViolationKind,
    /// Line number (1-indexed) of the offending entry
    pub line_number: usize,
    /// The offending entry as it appears in the file
    pub domain: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl Violation {
    /// Entry appears more than once
    pub fn duplicate(line_number: usize, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            kind: ViolationKind::DuplicateEntry,
            line_number,
            message: format!("Duplicate entry: {domain}"),
            domain,
        }
    }

    /// Entry sorts before its predecessor
    pub fn wrong_sorting(line_number: usize, domain: impl Into<String>, previous: &str) -> Self {
        let domain = domain.into();
        Self {
            kind: ViolationKind::WrongSorting,
            line_number,
            message: format!("Wrong sorting: {domain} after {previous}"),
            domain,
        }
    }

    /// Entry does not parse into `domain.suffix`
    pub fn invalid_domain(
        line_number: usize,
        domain: impl Into<String>,
        parsed: impl std::fmt::Display,
    ) -> Self {
        let domain = domain.into();
        Self {
            kind: ViolationKind::InvalidDomain,
            line_number,
            message: format!("Not a valid domain: {domain} ({parsed})"),
            domain,
        }
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        self.message.clone()
    }
}

/// Count of violations by kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationCounts {
    pub duplicate_entry: usize,
    pub wrong_sorting: usize,
    pub invalid_domain: usize,
}

impl ViolationCounts {
    /// Total number of violations across all kinds
    pub fn total(&self) -> usize {
        self.duplicate_entry + self.wrong_sorting + self.invalid_domain
    }

    /// Add a violation to the counts
    pub fn add(&mut self, kind: ViolationKind) {
        match kind {
            ViolationKind::DuplicateEntry => self.duplicate_entry += 1,
            ViolationKind::WrongSorting => self.wrong_sorting += 1,
            ViolationKind::InvalidDomain => self.invalid_domain += 1,
        }
    }
}

/// Summary statistics for a validation report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Number of list entries walked
    pub total_entries: usize,
    /// Number of violations by kind
    pub violations_by_kind: ViolationCounts,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when validation was performed
    pub validated_at: DateTime<Utc>,
}

/// Result of one validation pass over a domain list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// List file that was validated, if it came from disk
    pub source: Option<PathBuf>,
    /// Violations in the order they were discovered
    pub violations: Vec<Violation>,
    /// Summary statistics
    pub summary: ValidationSummary,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            source: None,
            violations: Vec::new(),
            summary: ValidationSummary {
                validated_at: Utc::now(),
                ..Default::default()
            },
        }
    }

    /// Add a violation to the report
    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.violations_by_kind.add(violation.kind);
        self.violations.push(violation);
    }

    /// Whether the report contains any violations; any violation fails the run
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Get violations of a specific kind
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Set the number of entries walked
    pub fn set_entries_checked(&mut self, count: usize) {
        self.summary.total_entries = count;
    }

    /// Set the execution time
    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.summary.execution_time_ms = duration_ms;
    }

    /// Record which file the entries came from
    pub fn set_source(&mut self, source: impl Into<PathBuf>) {
        self.source = Some(source.into());
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Error types that can occur while maintaining the list
#[derive(Debug, thiserror::Error)]
pub enum BurnerError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or written
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The canonical list could not be fetched
    #[error("Fetch error for {location}: {message}")]
    Fetch { location: String, message: String },

    /// The DNS resolver could not be set up
    #[error("Resolver error: {message}")]
    Resolver { message: String },

    /// A report could not be serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl BurnerError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a resolver error
    pub fn resolver(message: impl Into<String>) -> Self {
        Self::Resolver {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Result type for list maintenance operations
pub type BurnerResult<T> = Result<T, BurnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            Violation::duplicate(2, "a.com").format_display(),
            "Duplicate entry: a.com"
        );
        assert_eq!(
            Violation::wrong_sorting(2, "a.com", "b.com").format_display(),
            "Wrong sorting: a.com after b.com"
        );
        assert_eq!(
            Violation::invalid_domain(1, "localhost", "domain='localhost', suffix=''")
                .format_display(),
            "Not a valid domain: localhost (domain='localhost', suffix='')"
        );
    }

    #[test]
    fn test_validation_report() {
        let mut report = ValidationReport::new();
        assert!(!report.has_violations());

        report.add_violation(Violation::duplicate(3, "a.com"));
        report.add_violation(Violation::wrong_sorting(4, "a.com", "b.com"));
        report.add_violation(Violation::duplicate(5, "b.com"));

        assert!(report.has_violations());
        assert_eq!(report.summary.violations_by_kind.total(), 3);
        assert_eq!(report.summary.violations_by_kind.duplicate_entry, 2);
        assert_eq!(report.violations_of(ViolationKind::WrongSorting).count(), 1);
        assert_eq!(report.violations[2].domain, "b.com");
    }

    #[test]
    fn test_rule_ids_are_stable() {
        assert_eq!(ViolationKind::DuplicateEntry.rule_id(), "duplicate_entry");
        assert_eq!(ViolationKind::WrongSorting.rule_id(), "wrong_sorting");
        assert_eq!(ViolationKind::InvalidDomain.rule_id(), "invalid_domain");
    }

    #[test]
    fn test_error_display() {
        let err = BurnerError::fetch("https://example.invalid/list", "connection refused");
        assert_eq!(
            err.to_string(),
            "Fetch error for https://example.invalid/list: connection refused"
        );
    }
}
