//! Proxy checking handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::server::AppState;
use crate::error::CheckerError;
use crate::models::{CheckProxiesRequest, CheckProxyParams, ProbeReport, ProbeResult};

/// Check a batch of proxies concurrently
pub async fn check_proxies(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckProxiesRequest>,
) -> Result<Json<ProbeReport>, CheckerError> {
    let report = state.checker.check_all(req.proxies, req.timeout).await?;
    Ok(Json(report))
}

/// Check a single proxy.
///
/// Each parameter is taken from the query string when present there and from
/// the JSON body otherwise. A request without a JSON body is fine; a JSON body
/// that does not parse is rejected.
pub async fn check_proxy(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CheckProxyParams>,
    body: Result<ApiJson<CheckProxyParams>, CheckerError>,
) -> Result<Json<ProbeResult>, CheckerError> {
    let body = match body {
        Ok(ApiJson(body)) => body,
        Err(CheckerError::InvalidJson(JsonRejection::MissingJsonContentType(_))) => {
            CheckProxyParams::default()
        }
        Err(e) => return Err(e),
    };

    let proxy = query.proxy.or(body.proxy).unwrap_or_default();
    let timeout = query.timeout.or(body.timeout);

    let result = state.checker.check_one(&proxy, timeout).await?;
    Ok(Json(result))
}
