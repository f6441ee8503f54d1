use crate::ports::OutboxRepository;
use catalog_domain::DomainError;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;

/// Drops delivered change events once they are older than the retention
/// window. Unpublished events are never touched.
pub struct PurgePublishedEventsUseCase {
    outbox: Arc<dyn OutboxRepository>,
}

impl PurgePublishedEventsUseCase {
    pub fn new(outbox: Arc<dyn OutboxRepository>) -> Self {
        Self { outbox }
    }

    pub async fn execute(&self, retention_hours: u32) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - Duration::hours(i64::from(retention_hours));
        let deleted = self.outbox.purge_published_before(cutoff).await?;
        if deleted > 0 {
            info!(deleted, retention_hours, "Published change events purged");
        }
        Ok(deleted)
    }
}
