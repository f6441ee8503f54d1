use async_trait::async_trait;
use catalog_domain::{
    ChangeEvent, DomainError, NewProduct, Page, PageRequest, Product, ProductPatch, ProductSearch,
};

/// Outcome of a successful mutation: the product as committed and the
/// change event staged in the outbox by the same transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    pub product: Product,
    pub event: ChangeEvent,
}

/// The authoritative store of versioned products.
///
/// Every mutation is one conditional write on `(sku, version)`; callers
/// never observe a partially applied change. Deleted products are kept as
/// tombstones and read back as `None`.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn get(&self, sku: &str) -> Result<Option<Product>, DomainError>;

    /// Fails with `AlreadyExists` when a live product holds the sku.
    async fn create(&self, product: NewProduct) -> Result<Committed, DomainError>;

    /// Fails with `VersionConflict` when the stored version differs from
    /// `expected_version`, or `ProductNotFound` when the sku is absent.
    async fn update(
        &self,
        sku: &str,
        patch: &ProductPatch,
        expected_version: i64,
    ) -> Result<Committed, DomainError>;

    async fn delete(&self, sku: &str, expected_version: i64) -> Result<Committed, DomainError>;

    /// Active and visible products.
    async fn list_visible(&self, page: &PageRequest) -> Result<Page<Product>, DomainError>;

    async fn search(
        &self,
        criteria: &ProductSearch,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError>;

    async fn list_by_category(
        &self,
        category_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Product>, DomainError>;

    async fn count_in_category(&self, category_id: i64) -> Result<u64, DomainError>;
}
