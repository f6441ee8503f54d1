use catalog_domain::{DomainError, Page, PageRequest, ProductSearch};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use super::ensure_category_exists;
use crate::ports::{CategoryRepository, ProductRepository};
use crate::services::{within_store_deadline, EnrichedProduct, InventoryEnricher};

/// Paged product reads. These go straight to the store; only single-sku
/// reads are cached.
pub struct ListProductsUseCase {
    repo: Arc<dyn ProductRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    enricher: Arc<InventoryEnricher>,
    store_timeout: Duration,
}

impl ListProductsUseCase {
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        enricher: Arc<InventoryEnricher>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            category_repo,
            enricher,
            store_timeout,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_visible(
        &self,
        page: PageRequest,
    ) -> Result<Page<EnrichedProduct>, DomainError> {
        let products = within_store_deadline(
            self.store_timeout,
            "list_visible",
            self.repo.list_visible(&page),
        )
        .await?;
        self.enrich_page(products).await
    }

    #[instrument(skip(self))]
    pub async fn search(
        &self,
        criteria: ProductSearch,
        page: PageRequest,
    ) -> Result<Page<EnrichedProduct>, DomainError> {
        if let (Some(min), Some(max)) = (&criteria.min_price, &criteria.max_price) {
            if min > max {
                return Err(DomainError::Validation(
                    "min_price cannot exceed max_price".to_string(),
                ));
            }
        }

        let products = within_store_deadline(
            self.store_timeout,
            "search",
            self.repo.search(&criteria, &page),
        )
        .await?;
        self.enrich_page(products).await
    }

    #[instrument(skip(self))]
    pub async fn by_category(
        &self,
        category_id: i64,
        page: PageRequest,
    ) -> Result<Page<EnrichedProduct>, DomainError> {
        ensure_category_exists(&self.category_repo, category_id, self.store_timeout).await?;

        let products = within_store_deadline(
            self.store_timeout,
            "list_by_category",
            self.repo.list_by_category(category_id, &page),
        )
        .await?;
        self.enrich_page(products).await
    }

    async fn enrich_page(
        &self,
        page: Page<catalog_domain::Product>,
    ) -> Result<Page<EnrichedProduct>, DomainError> {
        let Page {
            items,
            page,
            size,
            total_elements,
            total_pages,
        } = page;
        let items = self.enricher.enrich_all(items).await;
        Ok(Page {
            items,
            page,
            size,
            total_elements,
            total_pages,
        })
    }
}
