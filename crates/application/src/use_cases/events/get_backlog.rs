use crate::ports::OutboxRepository;
use catalog_domain::DomainError;
use std::sync::Arc;

pub struct GetEventBacklogUseCase {
    outbox: Arc<dyn OutboxRepository>,
}

impl GetEventBacklogUseCase {
    pub fn new(outbox: Arc<dyn OutboxRepository>) -> Self {
        Self { outbox }
    }

    /// Number of change events not yet delivered.
    pub async fn execute(&self) -> Result<u64, DomainError> {
        self.outbox.pending_count().await
    }
}
