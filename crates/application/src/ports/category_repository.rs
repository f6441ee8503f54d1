use async_trait::async_trait;
use catalog_domain::{Category, DomainError};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> Result<Category, DomainError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, DomainError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;

    /// Every category, active or not.
    async fn get_all(&self) -> Result<Vec<Category>, DomainError>;

    async fn get_active(&self) -> Result<Vec<Category>, DomainError>;

    /// Active categories without a parent.
    async fn get_roots(&self) -> Result<Vec<Category>, DomainError>;

    async fn update(&self, category: Category) -> Result<Category, DomainError>;

    async fn delete(&self, id: i64) -> Result<(), DomainError>;

    async fn count_children(&self, id: i64) -> Result<u64, DomainError>;
}
