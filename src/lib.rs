//! Burner Domains - maintenance tooling for a curated list of disposable email domains
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - `validator` lints the list, `normalizer` rewrites it, `pruner` finds dead domains
//! - External collaborators (Public Suffix List, DNS, HTTP) sit behind small traits
//! - The CLI only wires configuration to these services and maps results to exit codes

pub mod cache;
pub mod config;
pub mod domain;
pub mod normalizer;
pub mod pruner;
pub mod report;
pub mod suffix;
pub mod validator;

// Re-export main types for convenient access
pub use domain::violations::{
    BurnerError, BurnerResult, ValidationReport, ValidationSummary, Violation, ViolationKind,
};

pub use config::BurnerConfig;

pub use normalizer::{normalize, normalize_file, NormalizeSummary};

pub use pruner::{AutoListSource, DnsMxLookup, PruneReport, Pruner};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use suffix::{DomainParts, SuffixParser};

pub use validator::ListValidator;

/// Validator using the suffix parser selected in the configuration
pub fn validator_from_config(config: &BurnerConfig) -> ListValidator<Box<dyn SuffixParser>> {
    ListValidator::new(suffix::parser_from_config(&config.suffix))
}

/// Pruner that fetches over HTTP (or from disk) and queries the system resolver
pub fn pruner_from_config(config: &BurnerConfig) -> BurnerResult<Pruner<AutoListSource, DnsMxLookup>> {
    let source = AutoListSource::new(config.prune.fetch_timeout())?;
    let resolver = DnsMxLookup::new(&config.dns)?;
    Ok(Pruner::new(source, resolver))
}

/// Validate the configured list file
pub fn check_list(config: &BurnerConfig) -> BurnerResult<ValidationReport> {
    validator_from_config(config).validate_file(&config.list.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuffixSource;
    use std::fs;
    use tempfile::TempDir;

    fn static_config(list_path: std::path::PathBuf) -> BurnerConfig {
        let mut config = BurnerConfig::default();
        config.list.path = list_path;
        config.suffix.source = SuffixSource::Static;
        config.suffix.static_suffixes = vec!["com".to_string(), "net".to_string()];
        config
    }

    #[test]
    fn test_normalized_list_passes_check() -> BurnerResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("emails.txt");
        fs::write(&path, "Zmail.net\nmailinator.com\n\nMAILINATOR.com\n")?;

        let config = static_config(path.clone());
        assert!(check_list(&config)?.has_violations());

        normalize_file(&path, false)?;

        let report = check_list(&config)?;
        assert!(!report.has_violations());
        assert_eq!(report.summary.total_entries, 2);
        Ok(())
    }

    #[test]
    fn test_normalizer_passes_invalid_domains_through() -> BurnerResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("emails.txt");
        fs::write(&path, "not_a_domain\na.com\n")?;

        normalize_file(&path, false)?;
        let report = check_list(&static_config(path))?;

        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::InvalidDomain);
        Ok(())
    }
}
