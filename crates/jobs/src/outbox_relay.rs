use catalog_application::services::EventDispatcher;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_RELAY_INTERVAL_MS: u64 = 1_000;

/// Periodically retries change events the write path could not deliver.
pub struct OutboxRelayJob {
    dispatcher: Arc<EventDispatcher>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl OutboxRelayJob {
    pub fn new(dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            dispatcher,
            interval: Duration::from_millis(DEFAULT_RELAY_INTERVAL_MS),
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
            interval_ms = self.interval.as_millis() as u64,
            publisher = self.dispatcher.publisher_name(),
            "Starting outbox relay job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("OutboxRelayJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.dispatcher.relay_due().await {
                            error!(error = %e, "Outbox relay pass failed");
                        }
                    }
                }
            }
        });
    }
}
