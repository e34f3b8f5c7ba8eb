//! Public-suffix-aware splitting of domain names
//!
//! Architecture: Port and Adapters - the validator only sees the `SuffixParser` port
//! - `PslSuffixParser` adapts the Public Suffix List (snapshot cached on disk by tldextract)
//! - `StaticSuffixParser` works from a fixed rule set and never touches the network

use crate::config::{SuffixConfig, SuffixSource};
use std::collections::HashSet;
use std::fmt;
use tldextract::{TldExtractor, TldOption};

/// A domain split into `subdomain.domain.suffix`; missing parts are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    /// The registrable label directly below the suffix
    pub domain: String,
    pub suffix: String,
}

impl DomainParts {
    /// Both a registrable domain and a public suffix are present
    pub fn is_registrable(&self) -> bool {
        !self.domain.is_empty() && !self.suffix.is_empty()
    }
}

impl fmt::Display for DomainParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subdomain='{}', domain='{}', suffix='{}'",
            self.subdomain, self.domain, self.suffix
        )
    }
}

/// Splits a domain into its parts. Never fails: unparseable input yields empty parts.
pub trait SuffixParser {
    fn parse(&self, domain: &str) -> DomainParts;
}

/// Parser backed by the ICANN section of the Public Suffix List
pub struct PslSuffixParser {
    extractor: TldExtractor,
}

impl PslSuffixParser {
    /// Loads the rules from `cache_path`, or from the bundled snapshot when the file is
    /// missing, and writes them back to `cache_path`.
    pub fn new(config: &SuffixConfig) -> Self {
        let option = TldOption::default()
            .cache_path(&config.cache_path.to_string_lossy())
            .update_local(true)
            .naive_mode(false);

        let extractor = TldExtractor::new(option);

        if !config.cache_path.exists() {
            tracing::warn!(
                "Could not write suffix cache {}",
                config.cache_path.display()
            );
        }

        Self { extractor }
    }
}

impl SuffixParser for PslSuffixParser {
    fn parse(&self, domain: &str) -> DomainParts {
        match self.extractor.extract(domain) {
            Ok(result) => DomainParts {
                subdomain: result.subdomain.unwrap_or_default(),
                domain: result.domain.unwrap_or_default(),
                suffix: result.suffix.unwrap_or_default(),
            },
            Err(e) => {
                tracing::debug!("Suffix extraction failed for '{}': {}", domain, e);
                DomainParts::default()
            }
        }
    }
}

/// Parser backed by a fixed set of suffix rules, longest match wins
#[derive(Debug, Clone)]
pub struct StaticSuffixParser {
    suffixes: HashSet<String>,
}

impl StaticSuffixParser {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(|s| s.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl SuffixParser for StaticSuffixParser {
    fn parse(&self, domain: &str) -> DomainParts {
        let host = domain.to_lowercase();

        // Candidate suffixes from longest to shortest: "a.b.c", "b.c", "c"
        let mut suffix_start = None;
        let mut offset = 0;
        loop {
            if self.suffixes.contains(&host[offset..]) {
                suffix_start = Some(offset);
                break;
            }
            match host[offset..].find('.') {
                Some(dot) => offset += dot + 1,
                None => break,
            }
        }

        let (rest, suffix) = match suffix_start {
            Some(0) => ("", host.as_str()),
            Some(start) => (&host[..start - 1], &host[start..]),
            None => (host.as_str(), ""),
        };

        let (subdomain, registrable) = match rest.rsplit_once('.') {
            Some((sub, label)) => (sub, label),
            None => ("", rest),
        };

        DomainParts {
            subdomain: subdomain.to_string(),
            domain: registrable.to_string(),
            suffix: suffix.to_string(),
        }
    }
}

/// Build the parser selected by configuration
pub fn parser_from_config(config: &SuffixConfig) -> Box<dyn SuffixParser> {
    match config.source {
        SuffixSource::Psl => Box::new(PslSuffixParser::new(config)),
        SuffixSource::Static => Box::new(StaticSuffixParser::new(&config.static_suffixes)),
    }
}

impl<P: SuffixParser + ?Sized> SuffixParser for Box<P> {
    fn parse(&self, domain: &str) -> DomainParts {
        (**self).parse(domain)
    }
}
