use catalog_domain::config::OutboxConfig;
use catalog_domain::DomainError;
use chrono::Utc;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::ports::{EventPublisher, OutboxRepository};

/// Exponential backoff with up to 25% jitter, capped at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base: Duration,
    pub max: Duration,
}

impl RetryPolicy {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }

    pub fn from_config(config: &OutboxConfig) -> Self {
        Self::new(
            Duration::from_millis(config.base_backoff_ms),
            Duration::from_millis(config.max_backoff_ms),
        )
    }

    /// Delay before the next try after `attempts` failures (`attempts >= 1`).
    pub fn backoff(&self, attempts: u32) -> Duration {
        let exponent = attempts.saturating_sub(1).min(20);
        let base_ms = self.base.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        let delay_ms = base_ms.saturating_mul(1u64 << exponent).min(max_ms);
        let jitter_ms = if delay_ms >= 4 {
            fastrand::u64(0..=delay_ms / 4)
        } else {
            0
        };
        Duration::from_millis(delay_ms.saturating_add(jitter_ms).min(max_ms))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub published: usize,
    pub failed: usize,
    /// Entries left untouched because an earlier entry is still backing off
    /// or failed in this pass.
    pub deferred: usize,
}

impl DispatchReport {
    fn absorb(&mut self, other: DispatchReport) {
        self.published += other.published;
        self.failed += other.failed;
        self.deferred += other.deferred;
    }
}

/// Publishes outbox entries in sequence order per sku.
///
/// Calls for the same sku are serialized on a per-key async lock, and a pass
/// stops at the first entry that cannot be published, so version N+1 is
/// never delivered before version N. Both the write path and the relay job
/// go through here.
pub struct EventDispatcher {
    outbox: Arc<dyn OutboxRepository>,
    publisher: Arc<dyn EventPublisher>,
    retry: RetryPolicy,
    publish_timeout: Duration,
    batch_size: u32,
    key_locks: DashMap<Arc<str>, Arc<Mutex<()>>, FxBuildHasher>,
}

impl EventDispatcher {
    pub fn new(
        outbox: Arc<dyn OutboxRepository>,
        publisher: Arc<dyn EventPublisher>,
        retry: RetryPolicy,
        publish_timeout: Duration,
        batch_size: u32,
    ) -> Self {
        Self {
            outbox,
            publisher,
            retry,
            publish_timeout,
            batch_size: batch_size.max(1),
            key_locks: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn publisher_name(&self) -> &'static str {
        self.publisher.name()
    }

    fn lock_for(&self, sku: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.key_locks.get(sku) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.key_locks
                .entry(Arc::from(sku))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    fn release_lock(&self, sku: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.key_locks
            .remove_if(sku, |_, l| Arc::strong_count(l) == 1);
    }

    /// Publishes every due entry queued for `sku`, oldest first.
    pub async fn dispatch_key(&self, sku: &str) -> Result<DispatchReport, DomainError> {
        let lock = self.lock_for(sku);
        let result = {
            let _guard = lock.lock().await;
            self.dispatch_locked(sku).await
        };
        self.release_lock(sku, lock);
        result
    }

    async fn dispatch_locked(&self, sku: &str) -> Result<DispatchReport, DomainError> {
        let pending = self.outbox.pending_for_key(sku, self.batch_size).await?;
        let mut report = DispatchReport::default();
        let now = Utc::now();

        let mut entries = pending.into_iter();
        while let Some(entry) = entries.next() {
            if !entry.is_due(now) {
                report.deferred += 1 + entries.len();
                debug!(sku = %sku, id = entry.id(), "Head of queue is backing off");
                break;
            }

            let outcome = match tokio::time::timeout(
                self.publish_timeout,
                self.publisher.publish(&entry.event),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(DomainError::Unavailable(format!(
                    "publish timed out after {}ms",
                    self.publish_timeout.as_millis()
                ))),
            };

            match outcome {
                Ok(()) => {
                    self.outbox.mark_published(entry.id(), Utc::now()).await?;
                    report.published += 1;
                    debug!(
                        sku = %sku,
                        id = entry.id(),
                        version = entry.event.version,
                        kind = entry.event.kind.to_str(),
                        "Change event published"
                    );
                }
                Err(e) => {
                    let attempts = entry.attempts.saturating_add(1);
                    let delay = self.retry.backoff(attempts);
                    let next_attempt_at = Utc::now()
                        + chrono::Duration::from_std(delay)
                            .unwrap_or_else(|_| chrono::Duration::seconds(60));
                    self.outbox
                        .record_failure(entry.id(), attempts, next_attempt_at, &e.to_string())
                        .await?;
                    report.failed += 1;
                    report.deferred += entries.len();
                    warn!(
                        sku = %sku,
                        id = entry.id(),
                        version = entry.event.version,
                        attempts,
                        retry_in_ms = delay.as_millis() as u64,
                        publisher = self.publisher.name(),
                        error = %e,
                        "Change event publish failed, will retry"
                    );
                    break;
                }
            }
        }

        Ok(report)
    }

    /// One relay pass over every sku with a due entry.
    pub async fn relay_due(&self) -> Result<DispatchReport, DomainError> {
        let keys = self.outbox.due_keys(Utc::now(), self.batch_size).await?;
        let mut total = DispatchReport::default();

        for key in keys {
            match self.dispatch_key(&key).await {
                Ok(report) => total.absorb(report),
                Err(e) => {
                    warn!(sku = %key, error = %e, "Outbox relay failed for key");
                }
            }
        }

        if total.published > 0 || total.failed > 0 {
            info!(
                published = total.published,
                failed = total.failed,
                deferred = total.deferred,
                "Outbox relay pass completed"
            );
        }

        Ok(total)
    }
}
