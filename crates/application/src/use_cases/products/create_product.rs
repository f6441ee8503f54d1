use catalog_domain::{DomainError, NewProduct, Product};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::ensure_category_exists;
use crate::ports::{CategoryRepository, ProductRepository};
use crate::services::{within_store_deadline, CacheLayer, ChangePropagator};

pub struct CreateProductUseCase {
    repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    cache: Arc<CacheLayer>,
    propagator: Arc<ChangePropagator>,
    store_timeout: Duration,
}

impl CreateProductUseCase {
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

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn execute(&self, product: NewProduct) -> Result<Product, DomainError> {
        product.validate()?;

        if let Some(category_id) = product.category_id {
            ensure_category_exists(&self.category_repo, category_id, self.store_timeout).await?;
        }

        // A revived sku gets a version past its tombstone, unknown until commit.
        let mut guard = self.cache.fence_guard(&product.sku, i64::MAX);
        let committed =
            within_store_deadline(self.store_timeout, "create", self.repo.create(product))
                .await
                .inspect_err(|e| guard.settle_error(e))?;

        info!(
            sku = %committed.product.sku,
            version = committed.product.version,
            price = %committed.product.price,
            stock_quantity = committed.product.stock_quantity,
            "Product created successfully"
        );

        self.propagator.propagate(&committed, guard).await;

        Ok(committed.product)
    }
}
