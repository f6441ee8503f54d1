use async_trait::async_trait;
use catalog_domain::{DomainError, Product};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Product),
    Miss,
}

/// Snapshot of product cache counters for API exposure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub puts: u64,
    pub rejected_puts: u64,
    pub invalidations: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
}

/// Version-guarded product cache.
///
/// An entry's version never regresses: `put` is ignored when the cache
/// already holds the same sku at a higher version, and `invalidate` leaves a
/// fence at `floor_version` that rejects older snapshots until it expires.
/// Failures are reported as `DomainError::Unavailable`.
#[async_trait]
pub trait ProductCache: Send + Sync {
    async fn lookup(&self, sku: &str) -> Result<CacheLookup, DomainError>;

    /// Returns whether the snapshot was stored. A put at the cached version
    /// is accepted and refreshes the entry's TTL.
    async fn put(&self, product: &Product) -> Result<bool, DomainError>;

    async fn invalidate(&self, sku: &str, floor_version: i64) -> Result<(), DomainError>;

    async fn purge_expired(&self) -> Result<usize, DomainError>;

    fn stats(&self) -> CacheStats;
}
