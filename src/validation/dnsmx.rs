use crate::error::DnsError;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf,
};

/// Default bound on a single domain lookup
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// A mail exchanger published for a domain
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

/// Answers whether a domain can receive mail.
///
/// Implementations return `Ok(false)` when the domain or its MX records do not
/// exist, and reserve `Err` for lookups whose outcome is unknown (timeouts,
/// unreachable nameservers). Callers decide how to degrade on `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainResolver: Send + Sync {
    async fn has_mail_exchanger(&self, domain: &str) -> Result<bool, DnsError>;

    /// MX records sorted by ascending preference
    async fn mx_records(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;
}

/// Which resolution tier a [`DnsResolver`] was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Structured MX query through the DNS client
    MxQuery,
    /// Plain host-to-address resolution
    HostLookup,
}

enum LookupStrategy {
    MxQuery(TokioAsyncResolver),
    HostLookup,
}

/// Production resolver backed by trust-dns.
///
/// The lookup tier is fixed at construction: MX queries when the system
/// resolver configuration can be loaded, host lookups otherwise. Every lookup
/// is bounded by the configured timeout.
pub struct DnsResolver {
    strategy: LookupStrategy,
    timeout: Duration,
}

impl DnsResolver {
    /// Builds a resolver from the system configuration (`/etc/resolv.conf` on Unix)
    pub fn new(timeout: Duration) -> Self {
        match system_conf::read_system_conf() {
            Ok((config, opts)) => Self::with_config(config, opts, timeout),
            Err(e) => {
                warn!("System DNS configuration unavailable ({}), using host lookups", e);
                Self::host_lookup(timeout)
            }
        }
    }

    /// Builds an MX-query resolver against explicit nameservers.
    ///
    /// Configures two attempts sharing the overall `timeout`.
    pub fn with_config(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Self {
        opts.timeout = timeout / 2;
        opts.attempts = 2;

        Self {
            strategy: LookupStrategy::MxQuery(TokioAsyncResolver::tokio(config, opts)),
            timeout,
        }
    }

    /// Builds a resolver restricted to the host-lookup tier
    pub fn host_lookup(timeout: Duration) -> Self {
        Self {
            strategy: LookupStrategy::HostLookup,
            timeout,
        }
    }

    pub fn tier(&self) -> Tier {
        match self.strategy {
            LookupStrategy::MxQuery(_) => Tier::MxQuery,
            LookupStrategy::HostLookup => Tier::HostLookup,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn query_mx(
        &self,
        resolver: &TokioAsyncResolver,
        domain: &str,
    ) -> Result<Vec<MxRecord>, DnsError> {
        let lookup = tokio::time::timeout(self.timeout, resolver.mx_lookup(domain))
            .await
            .map_err(|_| DnsError::Timeout(self.timeout))?;

        match lookup {
            Ok(lookup) => {
                let mut records: Vec<MxRecord> = lookup
                    .iter()
                    .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
                    .collect();
                records.sort();
                records.dedup();
                Ok(records)
            }
            Err(e) => classify(e, self.timeout).map(|_| Vec::new()),
        }
    }

    async fn resolve_host(&self, domain: &str) -> Result<bool, DnsError> {
        let lookup = tokio::time::timeout(self.timeout, tokio::net::lookup_host((domain, 0)))
            .await
            .map_err(|_| DnsError::Timeout(self.timeout))?;

        match lookup {
            Ok(mut addrs) => Ok(addrs.next().is_some()),
            Err(e) => {
                debug!("Host lookup for {} failed: {}", domain, e);
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl DomainResolver for DnsResolver {
    async fn has_mail_exchanger(&self, domain: &str) -> Result<bool, DnsError> {
        let verdict = match &self.strategy {
            LookupStrategy::MxQuery(resolver) => self
                .query_mx(resolver, domain)
                .await
                .map(|records| !records.is_empty()),
            LookupStrategy::HostLookup => self.resolve_host(domain).await,
        };

        debug!("Mail exchanger check for {}: {:?}", domain, verdict);
        verdict
    }

    async fn mx_records(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        match &self.strategy {
            LookupStrategy::MxQuery(resolver) => self.query_mx(resolver, domain).await,
            LookupStrategy::HostLookup => Ok(Vec::new()),
        }
    }
}

/// Builds the resolver used when MX checking is enabled without an injected one
pub fn default_resolver(timeout: Duration) -> Arc<dyn DomainResolver> {
    Arc::new(DnsResolver::new(timeout))
}

/// Maps a trust-dns failure onto the resolver contract.
///
/// A negative answer (NXDOMAIN or an empty answer section) is `Ok(false)`;
/// SERVFAIL and transport problems leave the outcome unknown.
pub(crate) fn classify(err: ResolveError, timeout: Duration) -> Result<bool, DnsError> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if *response_code == ResponseCode::ServFail =>
        {
            Err(DnsError::Unavailable(err.to_string()))
        }
        ResolveErrorKind::NoRecordsFound { .. } => Ok(false),
        ResolveErrorKind::Timeout => Err(DnsError::Timeout(timeout)),
        _ => Err(DnsError::Unavailable(err.to_string())),
    }
}

fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// Deterministic resolver answering from a fixed table.
///
/// Unknown domains have no mail exchanger. Every call is recorded so tests can
/// assert which domains were looked up.
#[derive(Default)]
pub struct StaticResolver {
    responses: HashMap<String, bool>,
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, domain: &str, has_mx: bool) -> Self {
        self.responses.insert(domain.to_ascii_lowercase(), has_mx);
        self
    }

    /// Makes lookups for `domain` fail as if DNS were unreachable
    pub fn with_failure(mut self, domain: &str) -> Self {
        self.failures.insert(domain.to_ascii_lowercase());
        self
    }

    /// Domains looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn answer(&self, domain: &str) -> Result<bool, DnsError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(domain.to_string());
        }

        let key = domain.to_ascii_lowercase();
        if self.failures.contains(&key) {
            return Err(DnsError::Unavailable(format!("no nameserver reachable for {}", domain)));
        }
        Ok(self.responses.get(&key).copied().unwrap_or(false))
    }
}

#[async_trait]
impl DomainResolver for StaticResolver {
    async fn has_mail_exchanger(&self, domain: &str) -> Result<bool, DnsError> {
        self.answer(domain)
    }

    async fn mx_records(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        if self.answer(domain)? {
            Ok(vec![MxRecord::new(10, format!("mail.{}", domain.to_ascii_lowercase()))])
        } else {
            Ok(Vec::new())
        }
    }
}
