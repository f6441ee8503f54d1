use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_domain::DomainError;
use serde_json::json;
use tracing::error;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::ProductNotFound(_)
            | DomainError::CategoryNotFound(_)
            | DomainError::NotFound(_) => StatusCode::NOT_FOUND,

            DomainError::VersionConflict { .. }
            | DomainError::AlreadyExists(_)
            | DomainError::CategoryHasSubcategories(_) => StatusCode::CONFLICT,

            DomainError::Validation(_) => StatusCode::BAD_REQUEST,

            DomainError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,

            DomainError::DatabaseError(_) | DomainError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
            "internal error".to_string()
        } else {
            self.0.to_string()
        };

        let mut body = json!({ "error": message });
        if let DomainError::VersionConflict { current, .. } = &self.0 {
            body["current_version"] = json!(current);
        }

        (status, Json(body)).into_response()
    }
}
