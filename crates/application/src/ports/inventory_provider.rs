use async_trait::async_trait;
use catalog_domain::DomainError;

/// Remote stock levels keyed by inventory id.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// `Ok(None)` when the inventory service does not know the id.
    async fn available_quantity(&self, inventory_id: i64) -> Result<Option<i64>, DomainError>;
}
