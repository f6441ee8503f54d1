pub mod cache;
pub mod database;
pub mod errors;
pub mod events;
pub mod inventory;
pub mod logging;
pub mod outbox;
pub mod root;
pub mod server;
pub mod timeouts;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use events::{EventSinkKind, EventsConfig};
pub use inventory::InventoryConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use outbox::OutboxConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use timeouts::TimeoutsConfig;
