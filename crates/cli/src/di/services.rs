use super::Repositories;
use catalog_application::{
    ports::{EventPublisher, InventoryProvider, ProductCache},
    services::{
        BoundaryTimeouts, CacheLayer, ChangePropagator, EventDispatcher, InventoryEnricher,
        RetryPolicy,
    },
};
use catalog_domain::{config::EventSinkKind, ChangeEvent, Config, DomainError};
use catalog_infrastructure::{
    cache::LruProductCache,
    events::{BroadcastEventPublisher, LogEventPublisher, WebhookEventPublisher},
    inventory::HttpInventoryProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

pub struct Services {
    pub timeouts: BoundaryTimeouts,
    pub cache: Arc<CacheLayer>,
    pub dispatcher: Arc<EventDispatcher>,
    pub propagator: Arc<ChangePropagator>,
    pub enricher: Arc<InventoryEnricher>,
    pub event_feed: Option<broadcast::Sender<ChangeEvent>>,
    pub event_sink: &'static str,
}

impl Services {
    pub fn new(config: &Config, repos: &Repositories) -> Result<Self, DomainError> {
        let timeouts = BoundaryTimeouts::from_config(&config.timeouts, &config.inventory);

        let product_cache: Option<Arc<dyn ProductCache>> = if config.cache.enabled {
            info!(
                max_entries = config.cache.max_entries,
                ttl_secs = config.cache.ttl_secs,
                "Product cache enabled"
            );
            Some(Arc::new(LruProductCache::new(
                config.cache.max_entries,
                Duration::from_secs(config.cache.ttl_secs),
            )))
        } else {
            info!("Product cache disabled");
            None
        };

        let cache = Arc::new(CacheLayer::new(
            product_cache,
            repos.product.clone(),
            timeouts.cache,
            timeouts.store,
        ));

        let (publisher, event_feed) = build_publisher(config, timeouts.publish)?;
        let event_sink = publisher.name();
        info!(sink = event_sink, "Change events sink configured");

        let dispatcher = Arc::new(EventDispatcher::new(
            repos.outbox.clone(),
            publisher,
            RetryPolicy::from_config(&config.outbox),
            timeouts.publish,
            config.outbox.batch_size,
        ));
        let propagator = Arc::new(ChangePropagator::new(cache.clone(), dispatcher.clone()));

        let provider: Option<Arc<dyn InventoryProvider>> = match config.inventory.base_url {
            Some(ref url) if !url.trim().is_empty() => {
                info!(base_url = %url, "Inventory enrichment enabled");
                Some(Arc::new(HttpInventoryProvider::new(url, timeouts.inventory)?))
            }
            _ => None,
        };
        let enricher = Arc::new(InventoryEnricher::new(provider, timeouts.inventory));

        Ok(Self {
            timeouts,
            cache,
            dispatcher,
            propagator,
            enricher,
            event_feed,
            event_sink,
        })
    }
}

fn build_publisher(
    config: &Config,
    timeout: Duration,
) -> Result<
    (
        Arc<dyn EventPublisher>,
        Option<broadcast::Sender<ChangeEvent>>,
    ),
    DomainError,
> {
    match config.events.sink {
        EventSinkKind::Broadcast => {
            let publisher = BroadcastEventPublisher::new(config.events.channel_capacity);
            let feed = publisher.sender();
            Ok((Arc::new(publisher), Some(feed)))
        }
        EventSinkKind::Webhook => {
            let url = config.events.webhook_url.clone().unwrap_or_default();
            Ok((Arc::new(WebhookEventPublisher::new(url, timeout)?), None))
        }
        EventSinkKind::Log => Ok((Arc::new(LogEventPublisher), None)),
    }
}
