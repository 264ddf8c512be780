//! Error types for the HTTP API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::cache::CacheError;
use crate::models::ErrorResponse;

// == API Error Enum ==
/// Unified error type for request handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Cache store or payload failure
    #[error(transparent)]
    Cache(#[from] CacheError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Cache(CacheError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Cache(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn corrupt_entry() -> CacheError {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        CacheError::Deserialization {
            key: "product:1".to_string(),
            source,
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound("product 9".into()), StatusCode::NOT_FOUND),
            (ApiError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::from(CacheError::StoreUnavailable("timeout".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (ApiError::from(corrupt_entry()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_cache_error_message_is_transparent() {
        let err = ApiError::from(CacheError::StoreUnavailable("timeout".into()));
        assert_eq!(err.to_string(), "Cache store unavailable: timeout");
    }
}
