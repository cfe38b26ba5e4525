//! API route definitions

use axum::routing::{get, post};
use axum::Router;

use super::handlers;
use super::server::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route("/check-proxies", post(handlers::check::check_proxies))
        .route("/check-proxy", post(handlers::check::check_proxy))
        .with_state(state)
}
