//! API error types with IntoResponse.
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Store failures are logged here with their operation identity; the wire
//! only ever sees a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use depot_core::ValidationError;
use depot_db::RepositoryError;

/// API error type with automatic HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    /// Request payload failed validation (400)
    Validation(ValidationError),

    /// Path id and body id disagree (400)
    IdMismatch { path_id: i64, body_id: i64 },

    /// Product not found (404)
    NotFound { id: i64 },

    /// Repository failure (500, logged)
    Store(RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::IdMismatch { path_id, body_id } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "id_mismatch",
                    "message": format!("path id {} does not match body id {}", path_id, body_id)
                }),
            ),
            Self::NotFound { id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("product {} not found", id)
                }),
            ),
            Self::Store(e) => {
                tracing::error!(operation = %e.operation, "request failed in product store");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Required {
            field: "name".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn id_mismatch_is_400() {
        let err = ApiError::IdMismatch {
            path_id: 1,
            body_id: 2,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], "id_mismatch");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::NotFound { id: 42 };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], "not_found");
        assert_eq!(v["message"], "product 42 not found");
    }
}
