mod broadcast_publisher;
mod log_publisher;
mod webhook_publisher;

pub use broadcast_publisher::BroadcastEventPublisher;
pub use log_publisher::LogEventPublisher;
pub use webhook_publisher::{WebhookEventPublisher, PARTITION_KEY_HEADER};
