//! Per-run memoization for the pruner
//!
//! Architecture: Infrastructure Layer - caches are plain values owned by the caller
//! - `ListCache` keeps each fetched list so a location is downloaded once per run
//! - `MxCache` keeps each MX verdict so a domain is queried once per run
//! - Nothing is written to disk; a new run starts cold

use std::collections::HashMap;

/// Fetched lists keyed by location
#[derive(Debug, Default)]
pub struct ListCache {
    lists: HashMap<String, Vec<String>>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, location: &str) -> Option<&Vec<String>> {
        self.lists.get(location)
    }

    pub fn insert(&mut self, location: impl Into<String>, entries: Vec<String>) {
        self.lists.insert(location.into(), entries);
    }
}

/// MX verdicts keyed by domain, with hit/miss accounting
#[derive(Debug, Default)]
pub struct MxCache {
    verdicts: HashMap<String, bool>,
    hits: u64,
    misses: u64,
}

impl MxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a verdict, counting the hit or miss
    pub fn lookup(&mut self, domain: &str) -> Option<bool> {
        match self.verdicts.get(domain) {
            Some(&verdict) => {
                self.hits += 1;
                Some(verdict)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Record the verdict for a domain
    pub fn record(&mut self, domain: impl Into<String>, has_mx: bool) {
        self.verdicts.insert(domain.into(), has_mx);
    }

    /// Get cache statistics
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            total_domains: self.verdicts.len(),
            cache_hits: self.hits,
            cache_misses: self.misses,
            hit_rate: if self.hits + self.misses > 0 {
                (self.hits as f64) / ((self.hits + self.misses) as f64)
            } else {
                0.0
            },
        }
    }
}

/// Cache performance statistics
#[derive(Debug, Clone)]
pub struct CacheStatistics {
    pub total_domains: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_rate: f64,
}

impl CacheStatistics {
    /// Format statistics for display
    pub fn format_display(&self) -> String {
        format!(
            "MX cache: {} domains, {:.1}% hit rate ({} hits, {} misses)",
            self.total_domains,
            self.hit_rate * 100.0,
            self.cache_hits,
            self.cache_misses
        )
    }
}
