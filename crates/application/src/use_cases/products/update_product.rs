use catalog_domain::{DomainError, Product, ProductPatch};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::ensure_category_exists;
use crate::ports::{CategoryRepository, ProductRepository};
use crate::services::{within_store_deadline, CacheLayer, ChangePropagator};

pub struct UpdateProductUseCase {
    repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    cache: Arc<CacheLayer>,
    propagator: Arc<ChangePropagator>,
    store_timeout: Duration,
}

impl UpdateProductUseCase {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        cache: Arc<CacheLayer>,
        propagator: Arc<ChangePropagator>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            category_repo,
            cache,
            propagator,
            store_timeout,
        }
    }

    /// Applies `patch` if the stored version still equals `expected_version`.
    #[instrument(skip(self, patch))]
    pub async fn execute(
        &self,
        sku: &str,
        patch: ProductPatch,
        expected_version: i64,
    ) -> Result<Product, DomainError> {
        if patch.is_empty() {
            return Err(DomainError::Validation(
                "Update contains no changes".to_string(),
            ));
        }
        patch.validate()?;

        if let Some(Some(category_id)) = patch.category_id {
            ensure_category_exists(&self.category_repo, category_id, self.store_timeout).await?;
        }

        let mut guard = self.cache.fence_guard(sku, expected_version.saturating_add(1));
        let committed = within_store_deadline(
            self.store_timeout,
            "update",
            self.repo.update(sku, &patch, expected_version),
        )
        .await
        .inspect_err(|e| guard.settle_error(e))?;

        info!(
            sku = %committed.product.sku,
            version = committed.product.version,
            stock_quantity = committed.product.stock_quantity,
            is_active = committed.product.is_active,
            "Product updated successfully"
        );

        self.propagator.propagate(&committed, guard).await;

        Ok(committed.product)
    }
}
