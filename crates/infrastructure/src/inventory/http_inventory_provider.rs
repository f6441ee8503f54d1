use async_trait::async_trait;
use catalog_application::ports::InventoryProvider;
use catalog_domain::DomainError;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct InventoryResponse {
    #[serde(alias = "availableQuantity")]
    available_quantity: i64,
}

/// Client for the inventory service's `GET /api/inventory/{id}`.
pub struct HttpInventoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpInventoryProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent("catalog-service/1.0 (inventory)")
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Unavailable(format!("inventory client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InventoryProvider for HttpInventoryProvider {
    #[instrument(skip(self))]
    async fn available_quantity(&self, inventory_id: i64) -> Result<Option<i64>, DomainError> {
        let url = format!("{}/api/inventory/{}", self.base_url, inventory_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Unavailable(format!("inventory error for {}: {}", url, e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(inventory_id, "Inventory item unknown");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(DomainError::Unavailable(format!(
                "inventory HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        let body: InventoryResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Serialization(format!("inventory response: {}", e)))?;

        Ok(Some(body.available_quantity))
    }
}
