// crates/seclens-server/src/web/error.rs
// Error responses for the HTTP API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seclens_types::ErrorBody;
use std::fmt;
use tracing::error;

use crate::error::SeclensError;

/// Returned for any request whose body is not `{ "code": <non-empty string> }`
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request. Code must be provided as a string.";

/// Returned for every failure after validation; the cause stays in the logs
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze code. Please try again.";

/// API error rendered as `{ "error": message }`
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Invalid request body
    pub fn invalid_request() -> Self {
        Self::bad_request(INVALID_REQUEST_MESSAGE)
    }

    /// Log the real cause and collapse it into the generic 500
    pub fn from_analysis_failure(err: &SeclensError) -> Self {
        error!(kind = err.kind(), error = %err, "Error analyzing code");
        Self::internal(ANALYSIS_FAILED_MESSAGE)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(ErrorBody::new(self.message))).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let error = ApiError::internal("Test error");
        assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Test error");
    }

    #[test]
    fn test_invalid_request() {
        let error = ApiError::invalid_request();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, INVALID_REQUEST_MESSAGE);
    }

    #[test]
    fn test_analysis_failure_hides_cause() {
        let cause = SeclensError::Upstream {
            status: 401,
            message: "Incorrect API key provided: sk-abc".into(),
        };
        let error = ApiError::from_analysis_failure(&cause);
        assert_eq!(error.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, ANALYSIS_FAILED_MESSAGE);
        assert!(!error.message.contains("sk-abc"));
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = ApiError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "nope");
    }
}
