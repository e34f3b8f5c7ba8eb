//! Configuration loading and management for the burner list tooling
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to typed settings with defaults filled in
//! - Default configuration reproduces the zero-flag behavior of every command

use crate::domain::violations::{BurnerError, BurnerResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Canonical upstream list consumed by the pruner
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://raw.githubusercontent.com/wesbos/burner-email-providers/master/emails.txt";

/// File names searched in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["burner.yaml", "burner.yml", ".burner.yaml"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnerConfig {
    /// Configuration format version
    pub version: String,
    /// Location of the local list
    #[serde(default)]
    pub list: ListConfig,
    /// Public suffix parsing used by the validator
    #[serde(default)]
    pub suffix: SuffixConfig,
    /// Upstream list used by the pruner
    #[serde(default)]
    pub prune: PruneConfig,
    /// Resolver settings for MX checks
    #[serde(default)]
    pub dns: DnsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Path of the domain list, relative to the working directory
    pub path: PathBuf,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("emails.txt"),
        }
    }
}

/// Where suffix rules come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixSource {
    /// Full Public Suffix List with a local snapshot cache
    Psl,
    /// Fixed rules listed in `static_suffixes`
    Static,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixConfig {
    pub source: SuffixSource,
    /// Local snapshot of the Public Suffix List. Read first when present, written on every load.
    #[serde(default = "default_tld_cache")]
    pub cache_path: PathBuf,
    /// Rules for `source: static`
    #[serde(default)]
    pub static_suffixes: Vec<String>,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            source: SuffixSource::Psl,
            cache_path: default_tld_cache(),
            static_suffixes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PruneConfig {
    /// URL (or local path) of the canonical list
    pub upstream_url: String,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl PruneConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsConfig {
    /// Per-query timeout
    pub timeout_secs: u64,
    /// Attempts per query before the resolver gives up
    pub attempts: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            attempts: 4,
        }
    }
}

impl DnsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BurnerConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BurnerResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            BurnerError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            BurnerError::config(format!(
                "Failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> BurnerResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| BurnerError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the explicit file if given, else the first default file found, else defaults
    pub fn discover(explicit: Option<&Path>) -> BurnerResult<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        for name in DEFAULT_CONFIG_FILES {
            if Path::new(name).exists() {
                tracing::debug!("Using configuration from {name}");
                return Self::load_from_file(name);
            }
        }

        Ok(Self::default())
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> BurnerResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(BurnerError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.list.path.as_os_str().is_empty() {
            return Err(BurnerError::config("list.path must not be empty"));
        }

        if self.prune.upstream_url.trim().is_empty() {
            return Err(BurnerError::config("prune.upstream_url must not be empty"));
        }

        if self.prune.fetch_timeout_secs == 0 || self.dns.timeout_secs == 0 {
            return Err(BurnerError::config("Timeouts must be at least one second"));
        }

        if self.dns.attempts == 0 {
            return Err(BurnerError::config("dns.attempts must be at least 1"));
        }

        if self.suffix.source == SuffixSource::Static && self.suffix.static_suffixes.is_empty() {
            return Err(BurnerError::config(
                "suffix.source is 'static' but suffix.static_suffixes is empty",
            ));
        }

        Ok(())
    }
}

impl Default for BurnerConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            list: ListConfig::default(),
            suffix: SuffixConfig::default(),
            prune: PruneConfig::default(),
            dns: DnsConfig::default(),
        }
    }
}

fn default_tld_cache() -> PathBuf {
    PathBuf::from(".tld_cache")
}

fn default_fetch_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = BurnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.list.path, PathBuf::from("emails.txt"));
        assert_eq!(config.prune.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.suffix.source, SuffixSource::Psl);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = BurnerConfig::load_from_str(
            r#"
version: "1.0"
dns:
  timeout_secs: 2
  attempts: 1
"#,
        )
        .unwrap();

        assert_eq!(config.dns.timeout(), Duration::from_secs(2));
        assert_eq!(config.dns.attempts, 1);
        assert_eq!(config.list.path, PathBuf::from("emails.txt"));
        assert_eq!(config.suffix.cache_path, PathBuf::from(".tld_cache"));
    }

    #[test]
    fn test_static_suffixes() {
        let config = BurnerConfig::load_from_str(
            r#"
version: "1.0"
suffix:
  source: static
  static_suffixes: [com, co.uk]
"#,
        )
        .unwrap();

        assert_eq!(config.suffix.source, SuffixSource::Static);
        assert_eq!(config.suffix.static_suffixes, vec!["com", "co.uk"]);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(BurnerConfig::load_from_str("version: \"2.0\"").is_err());
        assert!(BurnerConfig::load_from_str(
            "version: \"1.0\"\nsuffix:\n  source: static\n"
        )
        .is_err());
        assert!(BurnerConfig::load_from_str(
            "version: \"1.0\"\ndns:\n  timeout_secs: 5\n  attempts: 0\n"
        )
        .is_err());
        assert!(BurnerConfig::load_from_str("not: [valid").is_err());
    }

    #[test]
    fn test_load_from_file_roundtrip() -> BurnerResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("burner.yaml");

        let mut config = BurnerConfig::default();
        config.list.path = PathBuf::from("lists/emails.txt");
        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| BurnerError::serialization(e.to_string()))?;
        fs::write(&path, yaml)?;

        let loaded = BurnerConfig::discover(Some(path.as_path()))?;
        assert_eq!(loaded.list.path, PathBuf::from("lists/emails.txt"));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = BurnerConfig::load_from_file("/nonexistent/burner.yaml").unwrap_err();
        assert!(matches!(err, BurnerError::Configuration { .. }));
    }
}
