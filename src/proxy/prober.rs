//! Single-proxy probing
//!
//! Sends one GET to a "what is my IP" endpoint through the proxy under test and
//! turns whatever happens into a [`ProbeResult`].

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::models::{ProbeResult, UNKNOWN_IP};

use super::address::proxy_url;

/// Something that can check one proxy address.
///
/// Implementations never fail: every error is folded into the returned result.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: &str, timeout: Duration) -> ProbeResult;
}

/// Prober that routes a real HTTP request through the proxy
#[derive(Debug, Clone)]
pub struct HttpProber {
    check_url: String,
}

impl HttpProber {
    /// Create a prober that requests `check_url` through each proxy
    pub fn new(check_url: impl Into<String>) -> Self {
        Self {
            check_url: check_url.into(),
        }
    }

    /// One client per probe; nothing is pooled across proxies.
    fn build_client(&self, address: &str, timeout: Duration) -> reqwest::Result<Client> {
        let proxy = reqwest::Proxy::all(proxy_url(address))?;

        Client::builder()
            .proxy(proxy)
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()
    }
}

#[async_trait]
impl Prober for HttpProber {
    #[instrument(skip(self), fields(proxy = %address))]
    async fn probe(&self, address: &str, timeout: Duration) -> ProbeResult {
        let client = match self.build_client(address, timeout) {
            Ok(client) => client,
            Err(e) => {
                debug!("Could not build client: {}", e);
                return ProbeResult::failed(address, format!("Error: {}", describe(&e)));
            }
        };

        let start = Instant::now();
        let result = match fetch(&client, &self.check_url).await {
            Ok((status, body)) => {
                let response_time = round_millis(start.elapsed());
                if status == StatusCode::OK {
                    ProbeResult::working(address, response_time, extract_origin(&body))
                } else {
                    ProbeResult::http_failure(address, response_time, status.as_u16())
                }
            }
            Err(e) => classify_error(address, &e),
        };

        debug!(
            status = %result.status(),
            error = result.error().unwrap_or_default(),
            "Probe finished"
        );
        result
    }
}

async fn fetch(client: &Client, url: &str) -> reqwest::Result<(StatusCode, Vec<u8>)> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body.to_vec()))
}

fn classify_error(address: &str, err: &reqwest::Error) -> ProbeResult {
    if err.is_timeout() {
        ProbeResult::timeout(address)
    } else if err.is_connect() {
        if is_proxy_failure(err) {
            ProbeResult::failed(address, format!("Proxy error: {}", describe(err)))
        } else {
            ProbeResult::failed(address, format!("Connection error: {}", describe(err)))
        }
    } else {
        ProbeResult::failed(address, format!("Error: {}", describe(err)))
    }
}

/// The proxy was reached but refused to carry the request (CONNECT rejected,
/// auth demanded, SOCKS handshake failed).
///
/// An I/O error anywhere in the chain means the proxy itself could not be
/// reached, even when reqwest reports it from inside the tunnel step. The
/// top-level message is skipped because it embeds the target URL.
fn is_proxy_failure(err: &reqwest::Error) -> bool {
    let mut proxy_step = false;
    let mut source = err.source();
    while let Some(e) = source {
        if e.downcast_ref::<std::io::Error>().is_some() {
            return false;
        }
        let msg = e.to_string().to_ascii_lowercase();
        if msg.contains("tunnel") || msg.contains("proxy") || msg.contains("socks") {
            proxy_step = true;
        }
        source = e.source();
    }
    proxy_step
}

/// Error message followed by its source chain
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(e) = source {
        let msg = e.to_string();
        if parts.last() != Some(&msg) {
            parts.push(msg);
        }
        source = e.source();
    }
    parts.join(": ")
}

/// `origin` field of the JSON body, or [`UNKNOWN_IP`]
fn extract_origin(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("origin").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}

fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}
