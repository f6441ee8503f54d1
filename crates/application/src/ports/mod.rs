mod category_repository;
mod event_publisher;
mod inventory_provider;
mod outbox_repository;
mod product_cache;
mod product_repository;

pub use category_repository::CategoryRepository;
pub use event_publisher::EventPublisher;
pub use inventory_provider::InventoryProvider;
pub use outbox_repository::OutboxRepository;
pub use product_cache::{CacheLookup, CacheStats, ProductCache};
pub use product_repository::{Committed, ProductRepository};
