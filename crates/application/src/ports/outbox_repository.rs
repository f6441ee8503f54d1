use async_trait::async_trait;
use catalog_domain::{DomainError, OutboxEntry};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Delivery bookkeeping for change events staged by the product store.
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Unpublished entries for one sku, oldest first.
    async fn pending_for_key(&self, sku: &str, limit: u32)
        -> Result<Vec<OutboxEntry>, DomainError>;

    /// Skus whose oldest unpublished entry is due at `now`, ordered by that
    /// entry's sequence id.
    async fn due_keys(&self, now: DateTime<Utc>, limit: u32) -> Result<Vec<Arc<str>>, DomainError>;

    async fn mark_published(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError>;

    async fn record_failure(
        &self,
        id: i64,
        attempts: u32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError>;

    /// Deletes published entries older than `cutoff`. Returns the number
    /// removed.
    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;

    async fn pending_count(&self) -> Result<u64, DomainError>;
}
