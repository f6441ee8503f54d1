pub mod cache_sweep;
pub mod outbox_relay;
pub mod outbox_retention;
pub mod runner;

pub use cache_sweep::CacheSweepJob;
pub use outbox_relay::OutboxRelayJob;
pub use outbox_retention::OutboxRetentionJob;
pub use runner::JobRunner;
