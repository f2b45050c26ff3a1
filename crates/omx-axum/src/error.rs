//! Axum-specific error types and mappings.
//!
//! Maps core errors to HTTP status codes and `{"error": ...}` bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use omx_core::{ExportError, ProviderError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An upstream service could not be used.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::Internal(msg) => {
                error!("Internal server error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ProviderError> for HttpError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NoServers
            | ProviderError::NoValidServers
            | ProviderError::Rejected { .. } => Self::BadRequest(err.to_string()),
            ProviderError::Connection { .. }
            | ProviderError::Status { .. }
            | ProviderError::InvalidResponse { .. } => Self::ServiceUnavailable(err.to_string()),
        }
    }
}

impl From<ExportError> for HttpError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NothingToExport => Self::BadRequest(err.to_string()),
            ExportError::Encoding(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest("Invalid JSON payload".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_mapping() {
        assert!(matches!(
            HttpError::from(ProviderError::NoServers),
            HttpError::BadRequest(msg) if msg == "No servers provided"
        ));
        assert!(matches!(
            HttpError::from(ProviderError::Connection { reason: "refused".to_string() }),
            HttpError::ServiceUnavailable(_)
        ));
    }

    #[test]
    fn test_export_error_mapping() {
        let response = HttpError::from(ExportError::NothingToExport).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_hides_details() {
        let response = HttpError::Internal("secret".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
