use async_trait::async_trait;
use catalog_application::ports::OutboxRepository;
use catalog_domain::{ChangeEvent, DomainError, OutboxEntry};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::database::{format_timestamp, parse_timestamp};

type OutboxRow = (i64, String, i64, String, Option<String>, Option<String>);

pub struct SqliteOutboxRepository {
    pool: SqlitePool,
}

impl SqliteOutboxRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: OutboxRow) -> Result<OutboxEntry, DomainError> {
        let (id, payload, attempts, next_attempt_at, last_error, published_at) = row;

        let mut event: ChangeEvent = serde_json::from_str(&payload).map_err(|e| {
            DomainError::Serialization(format!("outbox entry {} payload: {}", id, e))
        })?;
        event.id = Some(id);

        Ok(OutboxEntry {
            event,
            attempts: attempts.clamp(0, u32::MAX as i64) as u32,
            next_attempt_at: parse_timestamp(&next_attempt_at)?,
            last_error,
            published_at: published_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

#[async_trait]
impl OutboxRepository for SqliteOutboxRepository {
    #[instrument(skip(self))]
    async fn pending_for_key(
        &self,
        sku: &str,
        limit: u32,
    ) -> Result<Vec<OutboxEntry>, DomainError> {
        let rows = sqlx::query_as::<_, OutboxRow>(
            "SELECT id, payload, attempts, next_attempt_at, last_error, published_at
             FROM outbox
             WHERE sku = ? AND published_at IS NULL
             ORDER BY id ASC
             LIMIT ?",
        )
        .bind(sku)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query pending outbox entries");
            DomainError::DatabaseError(e.to_string())
        })?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }

    #[instrument(skip(self))]
    async fn due_keys(
        &self,
        now: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Arc<str>>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT o.sku
             FROM outbox o
             WHERE o.id IN (
                 SELECT MIN(id) FROM outbox WHERE published_at IS NULL GROUP BY sku
             )
               AND o.next_attempt_at <= ?
             ORDER BY o.id ASC
             LIMIT ?",
        )
        .bind(format_timestamp(now))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query due outbox keys");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|(sku,)| Arc::from(sku.as_str())).collect())
    }

    #[instrument(skip(self))]
    async fn mark_published(&self, id: i64, at: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query("UPDATE outbox SET published_at = ?, last_error = NULL WHERE id = ?")
            .bind(format_timestamp(at))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, id, "Failed to mark outbox entry published");
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }

    #[instrument(skip(self, error))]
    async fn record_failure(
        &self,
        id: i64,
        attempts: u32,
        next_attempt_at: DateTime<Utc>,
        error: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE outbox SET attempts = ?, next_attempt_at = ?, last_error = ? WHERE id = ?",
        )
        .bind(attempts as i64)
        .bind(format_timestamp(next_attempt_at))
        .bind(error)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, id, "Failed to record outbox failure");
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "DELETE FROM outbox WHERE published_at IS NOT NULL AND published_at < ?",
        )
        .bind(format_timestamp(cutoff))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to purge published outbox entries");
            DomainError::DatabaseError(e.to_string())
        })?;

        let removed = result.rows_affected();
        if removed > 0 {
            info!(removed, "Purged published outbox entries");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn pending_count(&self) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>(
            "SELECT COUNT(*) FROM outbox WHERE published_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to count pending outbox entries");
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(count.max(0) as u64)
    }
}
