#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_api::{create_api_routes, AppState, CategoryUseCases, ProductUseCases, SystemState};
use catalog_application::{
    ports::{CategoryRepository, EventPublisher, OutboxRepository, ProductCache, ProductRepository},
    services::{CacheLayer, ChangePropagator, EventDispatcher, InventoryEnricher, RetryPolicy},
    use_cases::*,
};
use catalog_infrastructure::{
    cache::LruProductCache,
    database::run_migrations,
    events::BroadcastEventPublisher,
    repositories::{SqliteCategoryRepository, SqliteOutboxRepository, SqliteProductRepository},
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub publisher: BroadcastEventPublisher,
}

async fn create_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();

    run_migrations(&pool).await.unwrap();
    pool
}

pub async fn create_test_app() -> TestApp {
    let pool = create_test_db().await;
    let store_timeout = Duration::from_secs(5);

    let products: Arc<dyn ProductRepository> = Arc::new(SqliteProductRepository::new(pool.clone()));
    let categories: Arc<dyn CategoryRepository> =
        Arc::new(SqliteCategoryRepository::new(pool.clone()));
    let outbox: Arc<dyn OutboxRepository> = Arc::new(SqliteOutboxRepository::new(pool.clone()));

    let publisher = BroadcastEventPublisher::new(64);
    let sink: Arc<dyn EventPublisher> = Arc::new(publisher.clone());
    let cache: Arc<dyn ProductCache> =
        Arc::new(LruProductCache::new(100, Duration::from_secs(60)));

    let cache_layer = Arc::new(CacheLayer::new(
        Some(cache),
        products.clone(),
        Duration::from_millis(200),
        store_timeout,
    ));
    let dispatcher = Arc::new(EventDispatcher::new(
        outbox.clone(),
        sink,
        RetryPolicy::new(Duration::from_millis(100), Duration::from_secs(1)),
        Duration::from_secs(1),
        50,
    ));
    let propagator = Arc::new(ChangePropagator::new(cache_layer.clone(), dispatcher));
    let enricher = Arc::new(InventoryEnricher::disabled());

    let update = Arc::new(UpdateProductUseCase::new(
        products.clone(),
        categories.clone(),
        cache_layer.clone(),
        propagator.clone(),
        store_timeout,
    ));

    let state = AppState {
        products: ProductUseCases {
            get: Arc::new(GetProductUseCase::new(cache_layer.clone(), enricher.clone())),
            list: Arc::new(ListProductsUseCase::new(
                products.clone(),
                categories.clone(),
                enricher,
                store_timeout,
            )),
            create: Arc::new(CreateProductUseCase::new(
                products.clone(),
                categories.clone(),
                cache_layer.clone(),
                propagator.clone(),
                store_timeout,
            )),
            deactivate: Arc::new(DeactivateProductUseCase::new(update.clone())),
            update,
            delete: Arc::new(DeleteProductUseCase::new(
                products,
                cache_layer.clone(),
                propagator,
                store_timeout,
            )),
        },
        categories: CategoryUseCases {
            get: Arc::new(GetCategoriesUseCase::new(categories.clone())),
            create: Arc::new(CreateCategoryUseCase::new(categories.clone())),
            update: Arc::new(UpdateCategoryUseCase::new(categories.clone())),
            deactivate: Arc::new(DeactivateCategoryUseCase::new(categories.clone())),
            delete: Arc::new(DeleteCategoryUseCase::new(categories)),
        },
        system: SystemState {
            cache_stats: Arc::new(GetCacheStatsUseCase::new(cache_layer)),
            event_backlog: Arc::new(GetEventBacklogUseCase::new(outbox)),
            event_feed: Some(publisher.sender()),
            event_sink: "broadcast",
        },
    };

    TestApp {
        router: create_api_routes(state),
        pool,
        publisher,
    }
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
