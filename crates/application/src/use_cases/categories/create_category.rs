use catalog_domain::{Category, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::CategoryRepository;

pub struct CreateCategoryUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, description))]
    pub async fn execute(
        &self,
        name: String,
        slug: Option<String>,
        description: Option<String>,
        parent_id: Option<i64>,
        display_order: Option<i32>,
    ) -> Result<Category, DomainError> {
        let category = Category::new(
            Arc::from(name.trim()),
            slug.as_deref().map(Arc::from),
            description.as_deref().map(Arc::from),
            parent_id,
            display_order,
        );
        category.validate()?;

        if let Some(pid) = parent_id {
            self.repo
                .get_by_id(pid)
                .await?
                .ok_or(DomainError::CategoryNotFound(pid))?;
        }

        let created = self.repo.create(category).await?;

        info!(
            category_id = ?created.id,
            name = %created.name,
            slug = %created.slug,
            parent_id = ?created.parent_id,
            "Category created successfully"
        );

        Ok(created)
    }
}
