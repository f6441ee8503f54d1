use catalog_domain::{DomainError, Product};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::timeouts::within_store_deadline;
use crate::ports::{CacheLookup, CacheStats, ProductCache, ProductRepository};

/// Read-through policy over an optional product cache.
///
/// The cache is advisory: lookup failures and timeouts read as misses and
/// write-side invalidation failures are logged and swallowed. Only the store
/// can fail a request.
pub struct CacheLayer {
    cache: Option<Arc<dyn ProductCache>>,
    store: Arc<dyn ProductRepository>,
    cache_timeout: Duration,
    store_timeout: Duration,
}

impl CacheLayer {
    pub fn new(
        cache: Option<Arc<dyn ProductCache>>,
        store: Arc<dyn ProductRepository>,
        cache_timeout: Duration,
        store_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            cache_timeout,
            store_timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Cache lookup, falling through to the store on a miss. Products read
    /// from the store are offered back to the cache, which rejects them if a
    /// newer version was fenced in the meantime.
    pub async fn get(&self, sku: &str) -> Result<Option<Product>, DomainError> {
        if let Some(product) = self.lookup(sku).await {
            return Ok(Some(product));
        }

        let product = within_store_deadline(self.store_timeout, "get", self.store.get(sku)).await?;

        if let Some(ref p) = product {
            self.populate(p).await;
        }

        Ok(product)
    }

    async fn lookup(&self, sku: &str) -> Option<Product> {
        let cache = self.cache.as_ref()?;
        match tokio::time::timeout(self.cache_timeout, cache.lookup(sku)).await {
            Ok(Ok(CacheLookup::Hit(product))) => {
                debug!(sku = %sku, version = product.version, "Cache HIT");
                Some(product)
            }
            Ok(Ok(CacheLookup::Miss)) => {
                debug!(sku = %sku, "Cache MISS");
                None
            }
            Ok(Err(e)) => {
                warn!(sku = %sku, error = %e, "Cache lookup failed, reading from store");
                None
            }
            Err(_) => {
                warn!(sku = %sku, "Cache lookup timed out, reading from store");
                None
            }
        }
    }

    /// Returns whether the cache accepted the snapshot.
    pub async fn populate(&self, product: &Product) -> bool {
        let Some(cache) = self.cache.as_ref() else {
            return false;
        };
        match tokio::time::timeout(self.cache_timeout, cache.put(product)).await {
            Ok(Ok(accepted)) => {
                if !accepted {
                    debug!(
                        sku = %product.sku,
                        version = product.version,
                        "Cache kept a newer version, snapshot discarded"
                    );
                }
                accepted
            }
            Ok(Err(e)) => {
                warn!(sku = %product.sku, error = %e, "Cache put failed");
                false
            }
            Err(_) => {
                warn!(sku = %product.sku, "Cache put timed out");
                false
            }
        }
    }

    /// Drops any cached snapshot older than `floor_version`. Returns false
    /// when the cache could not be reached.
    pub async fn invalidate(&self, sku: &str, floor_version: i64) -> bool {
        let Some(cache) = self.cache.as_ref() else {
            return true;
        };
        match tokio::time::timeout(self.cache_timeout, cache.invalidate(sku, floor_version)).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(sku = %sku, floor_version, error = %e, "Cache invalidation failed");
                false
            }
            Err(_) => {
                warn!(sku = %sku, floor_version, "Cache invalidation timed out");
                false
            }
        }
    }

    /// Arms a fence for a write that is about to hit the store. If the guard
    /// is dropped while still armed, the cache entry is fenced at
    /// `floor_version` from a background task.
    pub fn fence_guard(&self, sku: &str, floor_version: i64) -> CacheFenceGuard {
        CacheFenceGuard {
            cache: self.cache.clone(),
            sku: Arc::from(sku),
            floor_version,
            cache_timeout: self.cache_timeout,
            armed: true,
        }
    }

    pub async fn purge_expired(&self) -> usize {
        let Some(cache) = self.cache.as_ref() else {
            return 0;
        };
        match cache.purge_expired().await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(error = %e, "Cache purge failed");
                0
            }
        }
    }

    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }
}

pub struct CacheFenceGuard {
    cache: Option<Arc<dyn ProductCache>>,
    sku: Arc<str>,
    floor_version: i64,
    cache_timeout: Duration,
    armed: bool,
}

impl CacheFenceGuard {
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// A store error other than `Unavailable` means the write definitely did
    /// not commit, so there is nothing to fence.
    pub fn settle_error(&mut self, error: &DomainError) {
        if !error.is_unavailable() {
            self.armed = false;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for CacheFenceGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Some(cache) = self.cache.take() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(sku = %self.sku, "No runtime to fence cache after an abandoned write");
            return;
        };

        let sku = Arc::clone(&self.sku);
        let floor_version = self.floor_version;
        let cache_timeout = self.cache_timeout;
        debug!(sku = %sku, floor_version, "Write abandoned, fencing cache entry");
        handle.spawn(async move {
            match tokio::time::timeout(cache_timeout, cache.invalidate(&sku, floor_version)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(sku = %sku, error = %e, "Cache fence after abandoned write failed"),
                Err(_) => warn!(sku = %sku, "Cache fence after abandoned write timed out"),
            }
        });
    }
}
