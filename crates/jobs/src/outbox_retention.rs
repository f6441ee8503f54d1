use catalog_application::use_cases::PurgePublishedEventsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct OutboxRetentionJob {
    purge: Arc<PurgePublishedEventsUseCase>,
    retention_hours: u32,
    interval: Duration,
    shutdown: CancellationToken,
}

impl OutboxRetentionJob {
    pub fn new(purge: Arc<PurgePublishedEventsUseCase>, retention_hours: u32) -> Self {
        Self {
            purge,
            retention_hours,
            interval: Duration::from_secs(3600),
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
        info!(
            retention_hours = self.retention_hours,
            "Starting outbox retention job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("OutboxRetentionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.purge.execute(self.retention_hours).await {
                            error!(error = %e, "Outbox retention cleanup failed");
                        }
                    }
                }
            }
        });
    }
}
