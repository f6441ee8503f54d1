pub mod cache_layer;
pub mod change_propagator;
pub mod event_dispatcher;
pub mod inventory_enricher;
pub mod timeouts;

pub use cache_layer::{CacheFenceGuard, CacheLayer};
pub use change_propagator::ChangePropagator;
pub use event_dispatcher::{DispatchReport, EventDispatcher, RetryPolicy};
pub use inventory_enricher::{EnrichedProduct, InventoryEnricher};
pub use timeouts::{within_store_deadline, BoundaryTimeouts};
