use catalog_domain::{Category, CategoryTree, DomainError};
use std::sync::Arc;
use tracing::instrument;

use crate::ports::CategoryRepository;

pub struct GetCategoriesUseCase {
    repo: Arc<dyn CategoryRepository>,
}

impl GetCategoriesUseCase {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn get_active(&self) -> Result<Vec<Category>, DomainError> {
        self.repo.get_active().await
    }

    /// Every active root category with its active descendants.
    #[instrument(skip(self))]
    pub async fn get_roots(&self) -> Result<Vec<CategoryTree>, DomainError> {
        let roots = self.repo.get_roots().await?;
        let all = self.repo.get_all().await?;
        Ok(roots
            .into_iter()
            .map(|root| CategoryTree::build(root, &all))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_tree(&self, id: i64) -> Result<CategoryTree, DomainError> {
        let root = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?;
        let all = self.repo.get_all().await?;
        Ok(CategoryTree::build(root, &all))
    }

    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Category, DomainError> {
        self.repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Category with slug '{}'", slug)))
    }
}
