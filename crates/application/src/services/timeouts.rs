use catalog_domain::config::{InventoryConfig, TimeoutsConfig};
use catalog_domain::DomainError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Deadlines applied at each component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryTimeouts {
    pub store: Duration,
    pub cache: Duration,
    pub publish: Duration,
    pub inventory: Duration,
}

impl BoundaryTimeouts {
    pub fn from_config(timeouts: &TimeoutsConfig, inventory: &InventoryConfig) -> Self {
        Self {
            store: timeouts.store(),
            cache: timeouts.cache(),
            publish: timeouts.publish(),
            inventory: Duration::from_millis(inventory.timeout_ms),
        }
    }
}

impl Default for BoundaryTimeouts {
    fn default() -> Self {
        Self::from_config(&TimeoutsConfig::default(), &InventoryConfig::default())
    }
}

/// Runs a store call under `deadline`. An elapsed deadline surfaces as
/// `Unavailable`; the dropped call may or may not have committed.
pub async fn within_store_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    call: F,
) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = deadline.as_millis() as u64;
            warn!(operation, timeout_ms, "Store call timed out");
            Err(DomainError::Unavailable(format!(
                "store {} timed out after {}ms",
                operation, timeout_ms
            )))
        }
    }
}
