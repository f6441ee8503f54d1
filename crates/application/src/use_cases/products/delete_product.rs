use catalog_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use crate::ports::ProductRepository;
use crate::services::{within_store_deadline, CacheLayer, ChangePropagator};

pub struct DeleteProductUseCase {
    repo: Arc<dyn ProductRepository>,
    cache: Arc<CacheLayer>,
    propagator: Arc<ChangePropagator>,
    store_timeout: Duration,
}

impl DeleteProductUseCase {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        cache: Arc<CacheLayer>,
        propagator: Arc<ChangePropagator>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            cache,
            propagator,
            store_timeout,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, sku: &str, expected_version: i64) -> Result<(), DomainError> {
        let mut guard = self.cache.fence_guard(sku, expected_version.saturating_add(1));
        let committed = within_store_deadline(
            self.store_timeout,
            "delete",
            self.repo.delete(sku, expected_version),
        )
        .await
        .inspect_err(|e| guard.settle_error(e))?;

        info!(
            sku = %sku,
            tombstone_version = committed.product.version,
            "Product deleted successfully"
        );

        self.propagator.propagate(&committed, guard).await;

        Ok(())
    }
}
