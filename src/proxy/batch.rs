//! Batch orchestration
//!
//! Validates a check request, fans out one probe per address and collects the
//! results in input order.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{info, instrument};

use crate::config::CheckerConfig;
use crate::error::{CheckerError, Result};
use crate::models::{ProbeReport, ProbeResult};

use super::prober::Prober;

/// Runs validated batches of probes
#[derive(Clone)]
pub struct BatchChecker {
    prober: Arc<dyn Prober>,
    default_timeout: Duration,
    max_proxies: usize,
}

impl BatchChecker {
    pub fn new(prober: Arc<dyn Prober>, config: &CheckerConfig) -> Self {
        Self {
            prober,
            default_timeout: config.default_timeout(),
            max_proxies: config.max_proxies,
        }
    }

    /// Probe every address concurrently and summarize.
    ///
    /// All probes start together and the batch completes once each one has
    /// resolved on its own; there is no batch-wide deadline.
    #[instrument(skip(self, proxies), fields(count = proxies.len()))]
    pub async fn check_all(&self, proxies: Vec<String>, timeout: Option<u64>) -> Result<ProbeReport> {
        if proxies.is_empty() {
            return Err(CheckerError::EmptyProxyList);
        }
        if proxies.len() > self.max_proxies {
            return Err(CheckerError::TooManyProxies {
                max: self.max_proxies,
            });
        }
        let timeout = self.resolve_timeout(timeout)?;

        info!(
            "Checking {} proxies with {}s timeout",
            proxies.len(),
            timeout.as_secs()
        );

        let results = join_all(
            proxies
                .iter()
                .map(|address| self.prober.probe(address, timeout)),
        )
        .await;

        let report = ProbeReport::from_results(results);
        info!(
            "Check complete: {} working, {} failed",
            report.successful, report.failed
        );

        Ok(report)
    }

    /// Probe a single address
    pub async fn check_one(&self, proxy: &str, timeout: Option<u64>) -> Result<ProbeResult> {
        if proxy.trim().is_empty() {
            return Err(CheckerError::EmptyProxy);
        }
        let timeout = self.resolve_timeout(timeout)?;

        Ok(self.prober.probe(proxy, timeout).await)
    }

    fn resolve_timeout(&self, timeout: Option<u64>) -> Result<Duration> {
        match timeout {
            None => Ok(self.default_timeout),
            Some(0) => Err(CheckerError::InvalidTimeout),
            Some(secs) => Ok(Duration::from_secs(secs)),
        }
    }
}
