use axum::{extract::State, response::Json, routing::get, Router};
use catalog_application::ports::CacheStats;
use catalog_domain::DomainError;

use crate::{
    dto::{HealthResponse, ServiceInfoResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/cache/stats", get(get_cache_stats))
}

pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: "catalog-service",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "/api/health",
            "/api/products",
            "/api/products/search",
            "/api/categories",
            "/api/cache/stats",
            "/api/events",
        ],
    })
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let pending_events = state.system.event_backlog.execute().await?;
    Ok(Json(HealthResponse {
        status: "ok",
        event_sink: state.system.event_sink,
        pending_events,
        cache_enabled: state.system.cache_stats.execute().is_some(),
    }))
}

async fn get_cache_stats(State(state): State<AppState>) -> Result<Json<CacheStats>, ApiError> {
    state
        .system
        .cache_stats
        .execute()
        .map(Json)
        .ok_or_else(|| ApiError(DomainError::NotFound("Product cache is disabled".to_string())))
}
