use crate::error::{CheckerError, Result};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiServerConfig,
    /// Proxy check configuration
    pub checker: CheckerConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Port for the API server (default: 8000)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Allowed CORS origins (comma-separated, empty = localhost only)
    pub cors_origins: Vec<String>,
}

impl ApiServerConfig {
    /// Get the API server address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// "What is my IP" endpoint requested through each proxy
    pub check_url: String,
    /// Per-probe timeout in seconds when the request does not give one
    pub default_timeout: u64,
    /// Maximum number of proxies in one batch
    pub max_proxies: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            check_url: "https://httpbin.org/ip".to_string(),
            default_timeout: 10,
            max_proxies: 100,
        }
    }
}

impl CheckerConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout)
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = CheckerConfig::default();

        let default_timeout: u64 = get_env_or("CHECK_DEFAULT_TIMEOUT", "10")
            .parse()
            .map_err(|_| {
                CheckerError::InvalidConfig(
                    "CHECK_DEFAULT_TIMEOUT must be a valid number".into(),
                )
            })?;
        if default_timeout == 0 {
            return Err(CheckerError::InvalidConfig(
                "CHECK_DEFAULT_TIMEOUT must be greater than zero".into(),
            ));
        }

        let max_proxies: usize = get_env_or("CHECK_MAX_PROXIES", "100")
            .parse()
            .map_err(|_| {
                CheckerError::InvalidConfig("CHECK_MAX_PROXIES must be a valid number".into())
            })?;
        if max_proxies == 0 {
            return Err(CheckerError::InvalidConfig(
                "CHECK_MAX_PROXIES must be greater than zero".into(),
            ));
        }

        Ok(Config {
            api: ApiServerConfig {
                port: get_env_or("API_PORT", "8000").parse().map_err(|_| {
                    CheckerError::InvalidConfig("API_PORT must be a valid port number".into())
                })?,
                host: get_env_or("API_HOST", "0.0.0.0"),
                cors_origins: get_env_or("CORS_ORIGINS", "")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            checker: CheckerConfig {
                check_url: get_env_or("CHECK_URL", &defaults.check_url),
                default_timeout,
                max_proxies,
            },
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format: get_env_or("LOG_FORMAT", "pretty"),
            },
        })
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
