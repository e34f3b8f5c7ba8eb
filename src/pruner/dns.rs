//! MX lookups against the system resolver

use crate::config::DnsConfig;
use crate::domain::violations::{BurnerError, BurnerResult};
use async_trait::async_trait;
use std::fmt;
use trust_dns_resolver::{
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
    TokioAsyncResolver,
};

/// Why a domain has no usable mail exchange
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DnsFailure {
    #[error("domain does not exist")]
    NxDomain,
    #[error("no MX answer")]
    NoAnswer,
    #[error("no nameserver could answer")]
    NoNameservers,
    #[error("query timed out")]
    Timeout,
    #[error("{0}")]
    Other(String),
}

impl From<ResolveError> for DnsFailure {
    fn from(err: ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
                ResponseCode::NXDomain => Self::NxDomain,
                ResponseCode::ServFail | ResponseCode::Refused => Self::NoNameservers,
                _ => Self::NoAnswer,
            },
            ResolveErrorKind::NoConnections => Self::NoNameservers,
            ResolveErrorKind::Timeout => Self::Timeout,
            _ => Self::Other(err.to_string()),
        }
    }
}

/// Answers MX queries with the number of records found
#[async_trait]
pub trait MxLookup: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<usize, DnsFailure>;
}

/// MX lookups through trust-dns using the host's resolver configuration
pub struct DnsMxLookup {
    resolver: TokioAsyncResolver,
}

impl DnsMxLookup {
    /// Creates a resolver from the system configuration with the configured timeout and attempts
    pub fn new(config: &DnsConfig) -> BurnerResult<Self> {
        let (resolver_config, mut opts) = system_settings(read_system_conf())?;
        opts.timeout = config.timeout();
        opts.attempts = config.attempts;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
        })
    }
}

/// An unreadable system resolver configuration is a setup error
fn system_settings<E: fmt::Display>(
    read: Result<(ResolverConfig, ResolverOpts), E>,
) -> BurnerResult<(ResolverConfig, ResolverOpts)> {
    read.map_err(|e| {
        BurnerError::resolver(format!("cannot read system resolver configuration: {e}"))
    })
}

#[async_trait]
impl MxLookup for DnsMxLookup {
    async fn lookup_mx(&self, domain: &str) -> Result<usize, DnsFailure> {
        let records = self.resolver.mx_lookup(domain).await?;
        Ok(records.iter().count())
    }
}
