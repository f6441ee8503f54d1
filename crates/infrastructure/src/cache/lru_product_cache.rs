use async_trait::async_trait;
use catalog_application::ports::{CacheLookup, CacheStats, ProductCache};
use catalog_domain::{DomainError, Product};
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

enum Slot {
    Snapshot(Product),
    /// Version floor left by an invalidation. Reads miss; older puts are
    /// rejected.
    Fence(i64),
}

struct Entry {
    slot: Slot,
    expires_at: Instant,
}

impl Entry {
    fn version(&self) -> i64 {
        match self.slot {
            Slot::Snapshot(ref p) => p.version,
            Slot::Fence(floor) => floor,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    puts: AtomicU64,
    rejected_puts: AtomicU64,
    invalidations: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

/// Bounded in-process product cache with per-entry TTL.
///
/// The version check compares against the stored entry even after it has
/// expired, so only capacity eviction can drop a fence early.
pub struct LruProductCache {
    entries: Mutex<LruCache<Arc<str>, Entry, FxBuildHasher>>,
    ttl: Duration,
    counters: Counters,
}

impl LruProductCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            ttl,
            counters: Counters::default(),
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, LruCache<Arc<str>, Entry, FxBuildHasher>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Unavailable("product cache lock poisoned".to_string()))
    }

    fn store(
        &self,
        entries: &mut LruCache<Arc<str>, Entry, FxBuildHasher>,
        sku: Arc<str>,
        slot: Slot,
    ) {
        let entry = Entry {
            slot,
            expires_at: Instant::now() + self.ttl,
        };
        if let Some((evicted, _)) = entries.push(Arc::clone(&sku), entry) {
            if evicted != sku {
                self.counters.evictions.fetch_add(1, AtomicOrdering::Relaxed);
                debug!(sku = %evicted, "Product evicted from cache");
            }
        }
    }
}

#[async_trait]
impl ProductCache for LruProductCache {
    async fn lookup(&self, sku: &str) -> Result<CacheLookup, DomainError> {
        let mut entries = self.entries()?;
        let now = Instant::now();

        let outcome = match entries.get(sku) {
            Some(entry) if entry.is_expired(now) => CacheLookup::Miss,
            Some(Entry {
                slot: Slot::Snapshot(product),
                ..
            }) => CacheLookup::Hit(product.clone()),
            Some(_) | None => CacheLookup::Miss,
        };

        match outcome {
            CacheLookup::Hit(_) => self.counters.hits.fetch_add(1, AtomicOrdering::Relaxed),
            CacheLookup::Miss => self.counters.misses.fetch_add(1, AtomicOrdering::Relaxed),
        };

        Ok(outcome)
    }

    async fn put(&self, product: &Product) -> Result<bool, DomainError> {
        let mut entries = self.entries()?;

        if let Some(existing) = entries.peek(product.sku.as_ref()) {
            if existing.version() > product.version {
                self.counters.rejected_puts.fetch_add(1, AtomicOrdering::Relaxed);
                return Ok(false);
            }
        }

        self.store(
            &mut entries,
            Arc::clone(&product.sku),
            Slot::Snapshot(product.clone()),
        );
        self.counters.puts.fetch_add(1, AtomicOrdering::Relaxed);
        Ok(true)
    }

    async fn invalidate(&self, sku: &str, floor_version: i64) -> Result<(), DomainError> {
        let mut entries = self.entries()?;

        let floor = entries
            .peek(sku)
            .map_or(floor_version, |existing| existing.version().max(floor_version));
        self.store(&mut entries, Arc::from(sku), Slot::Fence(floor));
        self.counters.invalidations.fetch_add(1, AtomicOrdering::Relaxed);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, DomainError> {
        let mut entries = self.entries()?;
        let now = Instant::now();

        let expired: Vec<Arc<str>> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(sku, _)| Arc::clone(sku))
            .collect();

        for sku in &expired {
            entries.pop(sku.as_ref());
        }

        let removed = expired.len();
        if removed > 0 {
            self.counters
                .expirations
                .fetch_add(removed as u64, AtomicOrdering::Relaxed);
        }
        Ok(removed)
    }

    fn stats(&self) -> CacheStats {
        let (len, capacity) = match self.entries.lock() {
            Ok(entries) => (entries.len(), entries.cap().get()),
            Err(_) => (0, 0),
        };
        let hits = self.counters.hits.load(AtomicOrdering::Relaxed);
        let misses = self.counters.misses.load(AtomicOrdering::Relaxed);
        let total = hits + misses;

        CacheStats {
            entries: len,
            capacity,
            hits,
            misses,
            puts: self.counters.puts.load(AtomicOrdering::Relaxed),
            rejected_puts: self.counters.rejected_puts.load(AtomicOrdering::Relaxed),
            invalidations: self.counters.invalidations.load(AtomicOrdering::Relaxed),
            evictions: self.counters.evictions.load(AtomicOrdering::Relaxed),
            expirations: self.counters.expirations.load(AtomicOrdering::Relaxed),
            hit_rate: if total > 0 {
                (hits as f64 / total as f64) * 100.0
            } else {
                0.0
            },
        }
    }
}
