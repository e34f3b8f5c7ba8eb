//! List linter: duplicates, ordering and registrable-domain checks
//!
//! Architecture: Domain Service - one linear pass that collects every violation
//! - Ordering is checked pairwise against the line directly above
//! - Pairwise ordering plus the duplicate check implies global strict ascending order

use crate::domain::list::read_entries;
use crate::domain::violations::{BurnerResult, ValidationReport, Violation};
use crate::suffix::SuffixParser;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

/// Validates a domain list against its invariants
pub struct ListValidator<P: SuffixParser> {
    parser: P,
}

impl<P: SuffixParser> ListValidator<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Walk the entries once and report every violation in discovery order
    pub fn validate_entries<S: AsRef<str>>(&self, entries: &[S]) -> ValidationReport {
        let start_time = Instant::now();
        let mut report = ValidationReport::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        let mut previous: Option<&str> = None;

        for (index, entry) in entries.iter().enumerate() {
            let domain = entry.as_ref();
            let line_number = index + 1;

            if !seen.insert(domain) {
                report.add_violation(Violation::duplicate(line_number, domain));
            }

            if let Some(previous) = previous {
                if previous > domain {
                    report.add_violation(Violation::wrong_sorting(line_number, domain, previous));
                }
            }

            let parts = self.parser.parse(domain);
            if !parts.is_registrable() {
                report.add_violation(Violation::invalid_domain(line_number, domain, &parts));
            }

            previous = Some(domain);
        }

        report.set_entries_checked(entries.len());
        report.set_execution_time(start_time.elapsed().as_millis() as u64);

        tracing::debug!(
            "Checked {} entries, {} violations",
            entries.len(),
            report.violations.len()
        );

        report
    }

    /// Read and validate a list file
    pub fn validate_file<Q: AsRef<Path>>(&self, path: Q) -> BurnerResult<ValidationReport> {
        let path = path.as_ref();
        let entries = read_entries(path)?;
        let mut report = self.validate_entries(&entries);
        report.set_source(path);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violations::ViolationKind;
    use crate::config::SuffixConfig;
    use crate::suffix::{PslSuffixParser, StaticSuffixParser};
    use std::fs;
    use tempfile::TempDir;

    fn validator() -> ListValidator<StaticSuffixParser> {
        ListValidator::new(StaticSuffixParser::new(["com", "net", "org", "co.uk", "invalid"]))
    }

    fn messages(report: &ValidationReport) -> Vec<&str> {
        report.violations.iter().map(|v| v.message.as_str()).collect()
    }

    #[test]
    fn test_clean_list_has_no_violations() {
        let report = validator().validate_entries(&["a.com", "b.net", "example.co.uk", "z.org"]);
        assert!(!report.has_violations());
        assert_eq!(report.summary.total_entries, 4);
    }

    #[test]
    fn test_empty_list_is_clean() {
        let entries: Vec<String> = Vec::new();
        assert!(!validator().validate_entries(&entries).has_violations());
    }

    #[test]
    fn test_adjacent_duplicate_reported_once() {
        let report = validator().validate_entries(&["a.com", "a.com"]);
        assert_eq!(messages(&report), vec!["Duplicate entry: a.com"]);
        assert_eq!(report.violations[0].line_number, 2);
    }

    #[test]
    fn test_distant_duplicate_detected() {
        let report = validator().validate_entries(&["a.com", "b.com", "a.com"]);
        assert_eq!(report.violations_of(ViolationKind::DuplicateEntry).count(), 1);
        // The repeated entry is also out of order relative to b.com
        assert_eq!(report.violations_of(ViolationKind::WrongSorting).count(), 1);
    }

    #[test]
    fn test_wrong_sorting_names_both_entries() {
        let report = validator().validate_entries(&["b.com", "a.com"]);
        assert_eq!(messages(&report), vec!["Wrong sorting: a.com after b.com"]);
        assert!(report.has_violations());
    }

    #[test]
    fn test_sorting_compares_against_previous_line() {
        // c.com is compared with a.com (the line right above), not with b.com
        let report = validator().validate_entries(&["b.com", "a.com", "c.com"]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].domain, "a.com");
    }

    #[test]
    fn test_invalid_domain_on_first_line() {
        let report = validator().validate_entries(&["not_a_domain"]);
        assert_eq!(
            messages(&report),
            vec!["Not a valid domain: not_a_domain (subdomain='', domain='not_a_domain', suffix='')"]
        );
    }

    #[test]
    fn test_bare_suffix_and_blank_line_are_invalid() {
        let report = validator().validate_entries(&["", "co.uk"]);
        assert_eq!(report.violations_of(ViolationKind::InvalidDomain).count(), 2);
    }

    #[test]
    fn test_all_violations_in_discovery_order() {
        let report = validator().validate_entries(&["b.com", "a.com", "a.com", "localhost"]);
        let kinds: Vec<ViolationKind> = report.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::WrongSorting,
                ViolationKind::DuplicateEntry,
                ViolationKind::InvalidDomain,
            ]
        );
        assert_eq!(report.summary.violations_by_kind.total(), 3);
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        // Ordering is byte-wise; only the normalizer lowercases
        let report = validator().validate_entries(&["a.com", "B.com"]);
        assert_eq!(report.violations_of(ViolationKind::WrongSorting).count(), 1);
    }

    #[test]
    fn test_validate_file() -> BurnerResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("emails.txt");
        fs::write(&path, "a.com\nc.com\nb.com\n")?;

        let report = validator().validate_file(&path)?;
        assert_eq!(report.source.as_deref(), Some(path.as_path()));
        assert_eq!(report.summary.total_entries, 3);
        assert_eq!(messages(&report), vec!["Wrong sorting: b.com after c.com"]);
        assert_eq!(report.violations[0].line_number, 3);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(validator().validate_file("/nonexistent/emails.txt").is_err());
    }

    #[test]
    fn test_public_suffix_list_validation() -> BurnerResult<()> {
        let temp_dir = TempDir::new()?;
        let validator = ListValidator::new(PslSuffixParser::new(&SuffixConfig {
            cache_path: temp_dir.path().join(".tld_cache"),
            ..SuffixConfig::default()
        }));

        let report = validator.validate_entries(&["not_a_domain"]);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidDomain);
        assert!(report.violations[0]
            .message
            .starts_with("Not a valid domain: not_a_domain"));

        let report = validator.validate_entries(&[
            "0-mail.com",
            "example.co.uk",
            "guerrillamail.com",
            "mailinator.com",
            "yopmail.fr",
        ]);
        assert!(!report.has_violations());

        let report = validator.validate_entries(&["co.uk", "mailinator.com"]);
        assert_eq!(messages(&report), vec![
            "Not a valid domain: co.uk (subdomain='', domain='', suffix='co.uk')"
        ]);
        Ok(())
    }
}
