use catalog_application::services::CacheLayer;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Removes expired product cache entries so they stop occupying capacity.
pub struct CacheSweepJob {
    cache: Arc<CacheLayer>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(cache: Arc<CacheLayer>) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        if !self.cache.is_enabled() {
            info!("Product cache disabled, cache sweep job not started");
            return;
        }

        info!(
            interval_secs = self.interval.as_secs(),
            "Starting cache sweep job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.cache.purge_expired().await;
                        if removed > 0 {
                            debug!(removed, "Expired product cache entries swept");
                        }
                    }
                }
            }
        });
    }
}
