use async_trait::async_trait;
use catalog_application::ports::EventPublisher;
use catalog_domain::{ChangeEvent, DomainError};
use std::time::Duration;
use tracing::debug;

pub const PARTITION_KEY_HEADER: &str = "X-Partition-Key";

/// POSTs each change event as JSON to a fixed URL.
pub struct WebhookEventPublisher {
    client: reqwest::Client,
    url: String,
}

impl WebhookEventPublisher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent("catalog-service/1.0 (events)")
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Unavailable(format!("webhook client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EventPublisher for WebhookEventPublisher {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        let response = self
            .client
            .post(&self.url)
            .header(PARTITION_KEY_HEADER, event.partition_key())
            .json(event)
            .send()
            .await
            .map_err(|e| DomainError::Unavailable(format!("webhook error for {}: {}", self.url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Unavailable(format!(
                "webhook HTTP {} for {}",
                response.status().as_u16(),
                self.url
            )));
        }

        debug!(sku = %event.sku, version = event.version, "Change event delivered to webhook");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
