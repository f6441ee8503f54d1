use catalog_domain::{Category, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::CategoryRepository;

pub struct DeactivateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl DeactivateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<Category, DomainError> {
        let mut category = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?;

        category.is_active = false;
        let updated = self.repo.update(category).await?;

        info!(category_id = id, "Category deactivated");

        Ok(updated)
    }
}
