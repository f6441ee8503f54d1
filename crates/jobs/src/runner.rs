use crate::{CacheSweepJob, OutboxRelayJob, OutboxRetentionJob};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(OutboxRelayJob);
impl_spawnable_job!(CacheSweepJob);
impl_spawnable_job!(OutboxRetentionJob);

fn spawn_job<J: SpawnableJob>(job: Option<J>, shutdown: &Option<CancellationToken>) {
    if let Some(job) = job {
        let job = match shutdown {
            Some(token) => job.with_cancellation(token.clone()),
            None => job,
        };
        Arc::new(job).start_job();
    }
}

pub struct JobRunner {
    outbox_relay: Option<OutboxRelayJob>,
    cache_sweep: Option<CacheSweepJob>,
    outbox_retention: Option<OutboxRetentionJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            outbox_relay: None,
            cache_sweep: None,
            outbox_retention: None,
            shutdown: None,
        }
    }

    pub fn with_outbox_relay(mut self, job: OutboxRelayJob) -> Self {
        self.outbox_relay = Some(job);
        self
    }

    pub fn with_cache_sweep(mut self, job: CacheSweepJob) -> Self {
        self.cache_sweep = Some(job);
        self
    }

    pub fn with_outbox_retention(mut self, job: OutboxRetentionJob) -> Self {
        self.outbox_retention = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        spawn_job(self.outbox_relay, &self.shutdown);
        spawn_job(self.cache_sweep, &self.shutdown);
        spawn_job(self.outbox_retention, &self.shutdown);

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
