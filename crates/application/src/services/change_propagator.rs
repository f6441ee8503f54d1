use std::sync::Arc;
use tracing::warn;

use super::cache_layer::{CacheFenceGuard, CacheLayer};
use super::event_dispatcher::EventDispatcher;
use crate::ports::Committed;

/// Post-commit steps shared by every product write: fence the cache at the
/// committed version, then try to publish the staged event.
///
/// Neither step can fail the write. An unreachable cache is logged and an
/// unpublished event stays in the outbox for the relay job.
pub struct ChangePropagator {
    cache: Arc<CacheLayer>,
    dispatcher: Arc<EventDispatcher>,
}

impl ChangePropagator {
    pub fn new(cache: Arc<CacheLayer>, dispatcher: Arc<EventDispatcher>) -> Self {
        Self { cache, dispatcher }
    }

    pub async fn propagate(&self, committed: &Committed, mut guard: CacheFenceGuard) {
        let sku = &committed.product.sku;

        self.cache
            .invalidate(sku, committed.product.version)
            .await;
        guard.disarm();

        match self.dispatcher.dispatch_key(sku).await {
            Ok(report) if report.failed > 0 || report.deferred > 0 => {
                warn!(
                    sku = %sku,
                    version = committed.product.version,
                    "Change event queued for retry"
                );
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    sku = %sku,
                    version = committed.product.version,
                    error = %e,
                    "Change event dispatch failed, relay will retry"
                );
            }
        }
    }
}
