//! In-memory caching of search results.
//!
//! Successful search results are cached under `(query, range, limit)` for
//! the configured TTL, so rapid repeated views of the same object hit
//! Graylog at most once per window. Failures are never cached. The cache is
//! capacity-bounded with LRU eviction; entries are immutable once stored.

use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use moka::policy::EvictionPolicy;
use tracing::trace;

use crate::models::LogSearchResult;

/// Default cache capacity (number of entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Cache key identifying one search request.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CacheKey {
    pub query: String,
    pub range_secs: u64,
    pub limit: u64,
}

impl CacheKey {
    pub fn new(query: &str, range: Duration, limit: u64) -> Self {
        Self {
            query: query.to_string(),
            range_secs: range.as_secs(),
            limit,
        }
    }
}

/// A cached search result with its expiry bookkeeping.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    result: LogSearchResult,
    cached_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn new(result: LogSearchResult, ttl: Duration) -> Self {
        Self {
            result,
            cached_at: Instant::now(),
            ttl,
        }
    }

    /// Check expiry relative to a given reference time.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.cached_at) > self.ttl
    }
}

/// Concurrent, TTL-bounded cache of search results.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    inner: MokaCache<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache with the default capacity. A zero TTL disables
    /// caching entirely.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY, ttl)
    }

    /// Create a cache with a specific capacity.
    pub fn with_capacity(capacity: u64, ttl: Duration) -> Self {
        let inner = MokaCache::builder()
            .max_capacity(capacity.max(1))
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { inner, ttl }
    }

    /// Check if caching is enabled.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Get a live entry, evicting it if expired.
    pub async fn get(&self, key: &CacheKey) -> Option<LogSearchResult> {
        self.get_at(key, Instant::now()).await
    }

    /// Get a live entry, checking expiry relative to a given time.
    pub async fn get_at(&self, key: &CacheKey, now: Instant) -> Option<LogSearchResult> {
        if !self.is_enabled() {
            return None;
        }

        match self.inner.get(key).await {
            Some(entry) if entry.is_expired_at(now) => {
                trace!(query = %key.query, "cache entry expired");
                self.inner.invalidate(key).await;
                None
            }
            Some(entry) => {
                trace!(query = %key.query, "cache hit");
                Some(entry.result)
            }
            None => {
                trace!(query = %key.query, "cache miss");
                None
            }
        }
    }

    /// Store a result under the configured TTL. No-op when disabled.
    pub async fn insert(&self, key: CacheKey, result: LogSearchResult) {
        if !self.is_enabled() {
            return;
        }
        trace!(query = %key.query, "caching search result");
        self.inner.insert(key, CacheEntry::new(result, self.ttl)).await;
    }

    /// Number of entries currently held.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}
