use catalog_domain::Product;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::ports::InventoryProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub available_quantity: Option<i64>,
}

/// Attaches remote stock levels to products that carry an inventory id.
/// Lookups that fail or time out leave `available_quantity` empty.
pub struct InventoryEnricher {
    provider: Option<Arc<dyn InventoryProvider>>,
    timeout: Duration,
}

impl InventoryEnricher {
    pub fn new(provider: Option<Arc<dyn InventoryProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn disabled() -> Self {
        Self::new(None, Duration::from_secs(1))
    }

    pub async fn enrich(&self, product: Product) -> EnrichedProduct {
        let available_quantity = match (self.provider.as_ref(), product.inventory_id) {
            (Some(provider), Some(inventory_id)) => {
                match tokio::time::timeout(self.timeout, provider.available_quantity(inventory_id))
                    .await
                {
                    Ok(Ok(quantity)) => quantity,
                    Ok(Err(e)) => {
                        warn!(sku = %product.sku, inventory_id, error = %e, "Inventory lookup failed");
                        None
                    }
                    Err(_) => {
                        warn!(sku = %product.sku, inventory_id, "Inventory lookup timed out");
                        None
                    }
                }
            }
            _ => None,
        };

        EnrichedProduct {
            product,
            available_quantity,
        }
    }

    pub async fn enrich_all(&self, products: Vec<Product>) -> Vec<EnrichedProduct> {
        join_all(products.into_iter().map(|p| self.enrich(p))).await
    }
}
