//! Service identity and health endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::api::server::AppState;

/// Service descriptor
pub async fn root() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "running",
            "service": "Proxy Checker API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "check_proxies": "POST /check-proxies",
                "check_proxy": "POST /check-proxy",
                "health": "GET /health"
            }
        })),
    )
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now(),
            "uptime_seconds": state.started_at.elapsed().as_secs(),
        })),
    )
}

#[cfg(test)]
mod tests {
    use crate::api::routes::create_router;
    use crate::api::server::tests::test_state;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_describes_service() {
        let (status, body) = get_json("/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["service"], "Proxy Checker API");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["endpoints"]["check_proxies"], "POST /check-proxies");
        assert_eq!(body["endpoints"]["health"], "GET /health");
    }

    #[tokio::test]
    async fn test_health_reports_timestamp() {
        let (status, body) = get_json("/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(body["uptime_seconds"].is_u64());
    }
}
