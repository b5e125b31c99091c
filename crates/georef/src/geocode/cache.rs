//! In-memory cache in front of a geocode oracle.
//!
//! Batches typically repeat the same locality many times. Successful lookups
//! are cached by a SHA-256 hash of the query terms, plus the hint coordinates
//! when the inner oracle uses them; failed lookups are never cached so a
//! transient outage does not stick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::oracle::{GeocodeCandidate, GeocodeOracle, GeocodeQuery, GeocodeResponse};

/// Cache sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodeCacheConfig {
    /// Maximum number of cached queries.
    pub max_entries: u64,
    /// Time to live for a cached reply, in seconds.
    pub ttl_secs: u64,
}

impl Default for GeocodeCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl_secs: 3600,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A geocode oracle that memoizes successful replies of an inner oracle.
pub struct CachedGeocoder<G> {
    inner: G,
    cache: Cache<String, Vec<GeocodeCandidate>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<G: GeocodeOracle> CachedGeocoder<G> {
    /// Wrap an oracle with the default cache sizing.
    pub fn new(inner: G) -> Self {
        Self::with_config(inner, GeocodeCacheConfig::default())
    }

    pub fn with_config(inner: G, config: GeocodeCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();

        Self {
            inner,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// The wrapped oracle.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Drop every cached reply.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

/// Cache key for a query. Hint coordinates are part of the key only with
/// `with_hints`.
fn cache_key(query: &GeocodeQuery, with_hints: bool) -> String {
    let mut hasher = Sha256::new();
    for term in [&query.country, &query.state_province, &query.county, &query.locality] {
        hasher.update(term.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0u8]);
    }
    if with_hints {
        for hint in [&query.hint_latitude, &query.hint_longitude] {
            hasher.update([1u8]);
            hasher.update(hint.as_deref().unwrap_or_default().as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}

impl<G: GeocodeOracle> GeocodeOracle for CachedGeocoder<G> {
    fn query_candidates(&self, query: &GeocodeQuery) -> GeocodeResponse {
        let key = cache_key(query, self.inner.uses_hints());
        if let Some(candidates) = self.cache.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return GeocodeResponse::found(candidates);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let response = self.inner.query_candidates(query);
        if !response.service_failed {
            self.cache.insert(key, response.candidates.clone());
        }
        response
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn uses_hints(&self) -> bool {
        self.inner.uses_hints()
    }
}
