use async_trait::async_trait;
use catalog_domain::{ChangeEvent, DomainError};

/// Delivers change events downstream, keyed by sku. Delivery is
/// at-least-once: the same event may be published again after a failure.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError>;

    fn name(&self) -> &'static str;
}
