use catalog_domain::DomainError;
use std::sync::Arc;
use tracing::instrument;

use crate::services::{CacheLayer, EnrichedProduct, InventoryEnricher};

pub struct GetProductUseCase {
    cache: Arc<CacheLayer>,
    enricher: Arc<InventoryEnricher>,
}

impl GetProductUseCase {
    pub fn new(cache: Arc<CacheLayer>, enricher: Arc<InventoryEnricher>) -> Self {
        Self { cache, enricher }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, sku: &str) -> Result<EnrichedProduct, DomainError> {
        let product = self
            .cache
            .get(sku)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(sku.to_string()))?;

        Ok(self.enricher.enrich(product).await)
    }
}
