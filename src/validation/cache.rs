use super::dnsmx::{DomainResolver, MxRecord};
use crate::error::{ConfigError, DnsError};
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Storage for conclusive MX verdicts, keyed by lower-cased domain
#[async_trait]
pub trait MxCache: Send + Sync {
    async fn get(&self, domain: &str) -> Option<bool>;
    async fn set(&self, domain: &str, has_mx: bool);
}

/// In-process cache with a fixed time-to-live per entry
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (bool, Instant)>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MxCache for MemoryCache {
    async fn get(&self, domain: &str) -> Option<bool> {
        let entries = self.entries.read().ok()?;
        entries
            .get(domain)
            .filter(|(_, stored_at)| stored_at.elapsed() < self.ttl)
            .map(|(has_mx, _)| *has_mx)
    }

    async fn set(&self, domain: &str, has_mx: bool) {
        if let Ok(mut entries) = self.entries.write() {
            let ttl = self.ttl;
            entries.retain(|_, (_, stored_at)| stored_at.elapsed() < ttl);
            entries.insert(domain.to_string(), (has_mx, Instant::now()));
        }
    }
}

/// Redis-backed cache shared between service instances.
///
/// Entries live under `dns_mx::{domain}` as `valid`/`invalid` and expire after
/// the TTL. Connection or command failures are logged and treated as misses.
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<Client>,
    ttl: u64,
}

impl RedisCache {
    pub fn new(redis_url: &str, ttl: u64) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        Ok(Self {
            client: Arc::new(client),
            ttl,
        })
    }

    fn key(domain: &str) -> String {
        format!("dns_mx::{}", domain)
    }

    async fn try_get(&self, domain: &str) -> Result<Option<bool>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(Self::key(domain)).await?;
        Ok(cached.map(|value| value == "valid"))
    }

    async fn try_set(&self, domain: &str, has_mx: bool) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let cache_key = Self::key(domain);
        let value = if has_mx { "valid" } else { "invalid" };
        let _: () = conn.set(&cache_key, value).await?;
        let _: () = conn.expire(&cache_key, self.ttl as i64).await?;
        Ok(())
    }
}

#[async_trait]
impl MxCache for RedisCache {
    async fn get(&self, domain: &str) -> Option<bool> {
        match self.try_get(domain).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Redis cache read failed for {}: {}", domain, e);
                None
            }
        }
    }

    async fn set(&self, domain: &str, has_mx: bool) {
        if let Err(e) = self.try_set(domain, has_mx).await {
            warn!("Redis cache write failed for {}: {}", domain, e);
        }
    }
}

/// Picks the cache backend: Redis when a URL is configured, memory otherwise
pub fn build_cache(redis_url: Option<&str>, ttl: Duration) -> Result<Arc<dyn MxCache>, ConfigError> {
    match redis_url {
        Some(url) => Ok(Arc::new(RedisCache::new(url, ttl.as_secs())?)),
        None => Ok(Arc::new(MemoryCache::new(ttl))),
    }
}

/// Resolver decorator that remembers conclusive MX verdicts.
///
/// Failed lookups are never cached, so a DNS outage does not outlive itself.
pub struct CachedResolver<R> {
    inner: R,
    cache: Arc<dyn MxCache>,
}

impl<R: DomainResolver> CachedResolver<R> {
    pub fn new(inner: R, cache: Arc<dyn MxCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<R: DomainResolver> DomainResolver for CachedResolver<R> {
    async fn has_mail_exchanger(&self, domain: &str) -> Result<bool, DnsError> {
        let key = domain.to_ascii_lowercase();

        if let Some(cached) = self.cache.get(&key).await {
            debug!("MX cache hit for {}", key);
            return Ok(cached);
        }

        let has_mx = self.inner.has_mail_exchanger(domain).await?;
        self.cache.set(&key, has_mx).await;
        Ok(has_mx)
    }

    async fn mx_records(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        self.inner.mx_records(domain).await
    }
}
