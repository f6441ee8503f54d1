use async_trait::async_trait;
use catalog_application::ports::EventPublisher;
use catalog_domain::{ChangeEvent, DomainError};
use tokio::sync::broadcast;
use tracing::debug;

/// In-process fan-out of change events. Subscribers that fall behind the
/// channel capacity lose the oldest events.
#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<ChangeEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Handle for consumers that subscribe later, such as the SSE feed.
    pub fn sender(&self) -> broadcast::Sender<ChangeEvent> {
        self.sender.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(&self, event: &ChangeEvent) -> Result<(), DomainError> {
        match self.sender.send(event.clone()) {
            Ok(receivers) => {
                debug!(sku = %event.sku, version = event.version, receivers, "Change event broadcast");
            }
            Err(_) => {
                debug!(sku = %event.sku, version = event.version, "No subscribers for change event");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "broadcast"
    }
}

impl std::fmt::Debug for BroadcastEventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastEventPublisher")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
