use crate::handlers;
use crate::state::AppState;
use axum::Router;

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::system::routes())
        .merge(handlers::products::routes())
        .merge(handlers::categories::routes())
        .merge(handlers::events::routes())
        .with_state(state)
}
