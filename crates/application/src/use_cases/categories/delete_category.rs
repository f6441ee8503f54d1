use catalog_domain::DomainError;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::CategoryRepository;

pub struct DeleteCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl DeleteCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<(), DomainError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?;

        if self.repo.count_children(id).await? > 0 {
            return Err(DomainError::CategoryHasSubcategories(id));
        }

        self.repo.delete(id).await?;

        info!(category_id = id, "Category deleted successfully");

        Ok(())
    }
}
