//! HTTP surface of the catalog service.
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use handlers::system::service_info;
pub use routes::create_api_routes;
pub use state::{AppState, CategoryUseCases, ProductUseCases, SystemState};
