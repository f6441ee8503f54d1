use async_trait::async_trait;
use catalog_application::ports::EventPublisher;
use catalog_domain::{ChangeEvent, DomainError};
use tracing::info;

pub struct LogEventPublisher;

#[async_trait]
impl EventPublisher for LogEventPublisher {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        info!(
            id = event.id,
            sku = %event.sku,
            kind = event.kind.to_str(),
            version = event.version,
            "Change event"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
