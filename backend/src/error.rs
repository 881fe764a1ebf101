//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};
use wellness_coach_shared::types::{ErrorDetail, ErrorResponse};
use wellness_coach_shared::ServiceError;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Upstream error: {message}")]
    External { message: String, retryable: bool },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let retryable = err.is_retryable();
        match err {
            ServiceError::Storage(msg) => ApiError::Storage(msg),
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::External(message) => ApiError::External { message, retryable },
            upstream @ ServiceError::Upstream { .. } => ApiError::External {
                message: upstream.to_string(),
                retryable,
            },
            ServiceError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), false),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), false),
            ApiError::Storage(msg) => {
                warn!("Storage error: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_UNAVAILABLE",
                    "The wellness store is temporarily unavailable".to_string(),
                    true,
                )
            }
            ApiError::External { message, retryable } => {
                warn!("Upstream error: {}", message);
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", message.clone(), *retryable)
            }
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg.clone(), false),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    false,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                retryable,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_storage_error_is_retryable_503() {
        let error: ApiError = ServiceError::Storage("connection refused".to_string()).into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_external_error_is_bad_gateway() {
        let error: ApiError = ServiceError::External("provider returned 500".to_string()).into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[rstest::rstest]
    #[case(ServiceError::Storage("down".into()), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ServiceError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::Upstream { status: 401, message: "steps".into() }, StatusCode::BAD_GATEWAY)]
    #[case(ServiceError::External("502".into()), StatusCode::BAD_GATEWAY)]
    #[case(ServiceError::Unavailable("off".into()), StatusCode::SERVICE_UNAVAILABLE)]
    fn test_service_error_status(#[case] err: ServiceError, #[case] expected: StatusCode) {
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_rejected_upstream_is_not_retryable() {
        let error: ApiError = ServiceError::Upstream {
            status: 403,
            message: "Failed to fetch steps data".into(),
        }
        .into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error.code, "UPSTREAM_ERROR");
        assert!(!body.error.retryable);
    }

    #[tokio::test]
    async fn test_storage_body_hides_cause() {
        let response = ApiError::Storage("password authentication failed".into()).into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(body.error.code, "STORAGE_UNAVAILABLE");
        assert!(body.error.retryable);
        assert!(!body.error.message.contains("password"));
    }
}
