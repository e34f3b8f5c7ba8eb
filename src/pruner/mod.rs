//! Pruning of burner domains that no longer receive mail
//!
//! Architecture: Domain Service - Pruner orchestrates list fetching and MX checks
//! - Each list location is fetched once per Pruner, each domain is queried once
//! - Domains are checked one after another; a failed lookup means "remove", never an error
//! - The result is advisory: nothing is written back to the list

pub mod dns;
pub mod source;

pub use dns::{DnsFailure, DnsMxLookup, MxLookup};
pub use source::{is_remote, AutoListSource, FileListSource, HttpListSource, ListSource};

use crate::cache::{CacheStatistics, ListCache, MxCache};
use crate::domain::violations::BurnerResult;
use serde::Serialize;

/// Outcome of pruning one list
#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    /// Where the list came from
    pub source: String,
    /// Domains without a working MX record, in list order
    pub removed: Vec<String>,
    /// Domains to keep, in list order
    pub kept: Vec<String>,
}

impl PruneReport {
    /// Number of entries that were checked
    pub fn checked(&self) -> usize {
        self.removed.len() + self.kept.len()
    }
}

/// Checks list entries for mail exchanges, remembering every answer for the run
pub struct Pruner<S: ListSource, M: MxLookup> {
    source: S,
    resolver: M,
    lists: ListCache,
    mx: MxCache,
}

impl<S: ListSource, M: MxLookup> Pruner<S, M> {
    pub fn new(source: S, resolver: M) -> Self {
        Self {
            source,
            resolver,
            lists: ListCache::new(),
            mx: MxCache::new(),
        }
    }

    /// Fetch a list once and split it into non-blank entries
    pub async fn fetch_list(&mut self, location: &str) -> BurnerResult<Vec<String>> {
        if let Some(entries) = self.lists.get(location) {
            return Ok(entries.clone());
        }

        let body = self.source.fetch(location).await?;
        let entries: Vec<String> = body
            .split('\n')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect();

        tracing::info!("Fetched {} domains from {}", entries.len(), location);
        self.lists.insert(location, entries.clone());
        Ok(entries)
    }

    /// Whether the domain has at least one MX record. Lookup failures count as "no".
    pub async fn has_mail_exchange(&mut self, domain: &str) -> bool {
        if let Some(verdict) = self.mx.lookup(domain) {
            return verdict;
        }

        let verdict = match self.resolver.lookup_mx(domain).await {
            Ok(count) => {
                tracing::debug!("{}: {} MX records", domain, count);
                count > 0
            }
            Err(failure) => {
                tracing::debug!("{}: {}", domain, failure);
                false
            }
        };

        self.mx.record(domain, verdict);
        verdict
    }

    /// Entries without a working mail exchange, in input order
    pub async fn find_unreachable(&mut self, domains: &[String]) -> Vec<String> {
        let mut unreachable = Vec::new();
        for domain in domains {
            if !self.has_mail_exchange(domain).await {
                unreachable.push(domain.clone());
            }
        }
        unreachable
    }

    /// Fetch the list at `location` and split it into removed and kept domains
    pub async fn prune(&mut self, location: &str) -> BurnerResult<PruneReport> {
        self.prune_with(location, |_| {}).await
    }

    /// Like `prune`, calling `on_removed` for each removed domain as soon as it is known
    pub async fn prune_with<F>(
        &mut self,
        location: &str,
        mut on_removed: F,
    ) -> BurnerResult<PruneReport>
    where
        F: FnMut(&str),
    {
        let domains = self.fetch_list(location).await?;

        let mut report = PruneReport {
            source: location.to_string(),
            ..Default::default()
        };

        for domain in domains {
            if self.has_mail_exchange(&domain).await {
                report.kept.push(domain);
            } else {
                tracing::info!("No working MX for {}", domain);
                on_removed(&domain);
                report.removed.push(domain);
            }
        }

        Ok(report)
    }

    /// Get MX cache statistics
    pub fn cache_statistics(&self) -> CacheStatistics {
        self.mx.statistics()
    }
}
