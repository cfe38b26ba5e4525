use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Unified error type for the proxy checker service
///
/// Only request validation and startup problems end up here. Failures of an
/// individual probe are reported inside its `ProbeResult` instead.
#[derive(Error, Debug)]
pub enum CheckerError {
    // Request validation
    #[error("Proxies list cannot be empty")]
    EmptyProxyList,

    #[error("Maximum {max} proxies per request")]
    TooManyProxies { max: usize },

    #[error("Proxy cannot be empty")]
    EmptyProxy,

    #[error("Timeout must be a positive number of seconds")]
    InvalidTimeout,

    // Request bodies and query strings that fail to deserialize
    #[error("{}", .0.body_text())]
    InvalidJson(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, CheckerError>;

impl CheckerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            CheckerError::EmptyProxyList
            | CheckerError::TooManyProxies { .. }
            | CheckerError::EmptyProxy
            | CheckerError::InvalidTimeout => StatusCode::BAD_REQUEST,

            // 400 or 422, as decided by the extractor
            CheckerError::InvalidJson(rejection) => rejection.status(),
            CheckerError::InvalidQuery(rejection) => rejection.status(),

            // 500 Internal Server Error
            CheckerError::InvalidConfig(_)
            | CheckerError::Io(_)
            | CheckerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for CheckerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_server_error() {
            error!("Request failed: {}", self);
        } else if self.is_client_error() {
            debug!("Request rejected: {}", self);
        }

        let body = json!({
            "detail": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_code_mapping() {
        assert_eq!(
            CheckerError::EmptyProxyList.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CheckerError::TooManyProxies { max: 100 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(CheckerError::EmptyProxy.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            CheckerError::InvalidTimeout.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CheckerError::InvalidConfig("bad".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_client_server_helpers() {
        assert!(CheckerError::EmptyProxy.is_client_error());
        assert!(!CheckerError::EmptyProxy.is_server_error());

        assert!(CheckerError::Internal("boom".to_string()).is_server_error());
        assert!(!CheckerError::Internal("boom".to_string()).is_client_error());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CheckerError::TooManyProxies { max: 100 }.to_string(),
            "Maximum 100 proxies per request"
        );
        assert_eq!(
            CheckerError::EmptyProxyList.to_string(),
            "Proxies list cannot be empty"
        );
    }

    #[tokio::test]
    async fn test_error_response_body_has_detail() {
        let response = CheckerError::EmptyProxy.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Proxy cannot be empty");
    }
}
