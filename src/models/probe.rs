use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// IP reported when the check endpoint answered 200 without a usable `origin`
pub const UNKNOWN_IP: &str = "Unknown";

/// Outcome of a single proxy probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Working,
    Failed,
    Timeout,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Working => "working",
            ProbeStatus::Failed => "failed",
            ProbeStatus::Timeout => "timeout",
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self, ProbeStatus::Working)
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of probing one proxy address.
///
/// Fields are only reachable through the constructors so the presence rules
/// hold: `ip_address` only on `working`, `error` only otherwise, and
/// `response_time` only when an HTTP response came back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    proxy: String,
    status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProbeResult {
    /// The proxy answered with HTTP 200
    pub fn working(proxy: impl Into<String>, response_time: f64, ip_address: impl Into<String>) -> Self {
        Self {
            proxy: proxy.into(),
            status: ProbeStatus::Working,
            response_time: Some(response_time),
            ip_address: Some(ip_address.into()),
            error: None,
        }
    }

    /// The proxy answered, but not with HTTP 200
    pub fn http_failure(proxy: impl Into<String>, response_time: f64, status_code: u16) -> Self {
        Self {
            proxy: proxy.into(),
            status: ProbeStatus::Failed,
            response_time: Some(response_time),
            ip_address: None,
            error: Some(format!("HTTP {}", status_code)),
        }
    }

    /// No response was received
    pub fn failed(proxy: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            proxy: proxy.into(),
            status: ProbeStatus::Failed,
            response_time: None,
            ip_address: None,
            error: Some(error.into()),
        }
    }

    /// The per-probe timeout fired before a response arrived
    pub fn timeout(proxy: impl Into<String>) -> Self {
        Self {
            proxy: proxy.into(),
            status: ProbeStatus::Timeout,
            response_time: None,
            ip_address: None,
            error: Some("Request timeout".to_string()),
        }
    }

    pub fn proxy(&self) -> &str {
        &self.proxy
    }

    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Elapsed seconds, rounded to milliseconds
    pub fn response_time(&self) -> Option<f64> {
        self.response_time
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_working(&self) -> bool {
        self.status.is_working()
    }
}

/// Summary of a batch check
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub timestamp: DateTime<Utc>,
    pub total_proxies: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<ProbeResult>,
}

impl ProbeReport {
    /// Build a report stamped with the current time. `results` must already be
    /// in input order.
    pub fn from_results(results: Vec<ProbeResult>) -> Self {
        let successful = results.iter().filter(|r| r.is_working()).count();

        Self {
            timestamp: Utc::now(),
            total_proxies: results.len(),
            successful,
            failed: results.len() - successful,
            results,
        }
    }
}

/// Body of `POST /check-proxies`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckProxiesRequest {
    pub proxies: Vec<String>,
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Parameters of `POST /check-proxy`, from the query string or a JSON body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckProxyParams {
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub timeout: Option<u64>,
}
