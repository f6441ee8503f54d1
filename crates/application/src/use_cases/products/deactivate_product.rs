use catalog_domain::{DomainError, Product, ProductPatch};
use std::sync::Arc;
use tracing::instrument;

use super::UpdateProductUseCase;

pub struct DeactivateProductUseCase {
    update: Arc<UpdateProductUseCase>,
}

impl DeactivateProductUseCase {
    pub fn new(update: Arc<UpdateProductUseCase>) -> Self {
        Self { update }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, sku: &str, expected_version: i64) -> Result<Product, DomainError> {
        self.update
            .execute(sku, ProductPatch::deactivate(), expected_version)
            .await
    }
}
