//! API server using Axum

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use crate::config::{ApiServerConfig, Config};
use crate::error::{CheckerError, Result};
use crate::proxy::{BatchChecker, HttpProber, Prober};

use super::middleware::{cors_layer, RequestLogging};
use super::routes;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub checker: BatchChecker,
    pub started_at: Instant,
}

impl AppState {
    /// Build state around any prober
    pub fn new(config: Config, prober: Arc<dyn Prober>) -> Self {
        let checker = BatchChecker::new(prober, &config.checker);

        Self {
            config,
            checker,
            started_at: Instant::now(),
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Create a new API server that probes through real HTTP requests
    pub fn new(config: Config) -> Self {
        let prober = Arc::new(HttpProber::new(config.checker.check_url.clone()));
        Self::with_state(AppState::new(config, prober))
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.api.clone(),
            state,
        }
    }

    /// Build the router
    pub fn build_router(&self) -> Router {
        let cors = cors_layer(&self.config.cors_origins);

        routes::create_router(self.state.clone())
            .layer(axum::middleware::from_fn(RequestLogging::log_request))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server until `shutdown` flips
    #[instrument(skip(self, shutdown))]
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .addr()
            .parse()
            .map_err(|e| CheckerError::InvalidConfig(format!("Invalid API server address: {}", e)))?;

        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("API server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.changed().await;
            })
            .await
            .map_err(|e| CheckerError::Internal(e.to_string()))?;

        info!("API server shut down");
        Ok(())
    }

    /// Serve until `signal` resolves, then shut down gracefully.
    ///
    /// Returns early with the server's error if it stops on its own, e.g. when
    /// the address cannot be bound.
    pub async fn serve(self, signal: impl Future<Output = ()>) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut api_task = tokio::spawn(async move { self.run(shutdown_rx).await });

        let finished = tokio::select! {
            joined = &mut api_task => Some(joined),
            _ = signal => None,
        };

        let joined = match finished {
            Some(joined) => joined,
            None => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
                api_task.await
            }
        };

        joined.map_err(|e| CheckerError::Internal(format!("API server task failed: {}", e)))?
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{CheckerConfig, LogConfig};
    use crate::proxy::batch::tests::StubProber;

    /// State backed by [`StubProber`] and default limits
    pub(crate) fn test_state() -> AppState {
        let config = Config {
            api: ApiServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
                cors_origins: vec![],
            },
            checker: CheckerConfig::default(),
            log: LogConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
        };

        AppState::new(config, Arc::new(StubProber::default()))
    }

    #[tokio::test]
    async fn test_serve_returns_bind_error() {
        let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

        let mut state = test_state();
        state.config.api.port = occupied.local_addr().unwrap().port();
        let server = ApiServer::with_state(state);

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            server.serve(std::future::pending()),
        )
        .await
        .unwrap();
        assert!(matches!(result, Err(CheckerError::Io(_))));
    }

    #[tokio::test]
    async fn test_serve_stops_on_signal() {
        let server = ApiServer::with_state(test_state());

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            server.serve(tokio::time::sleep(std::time::Duration::from_millis(50))),
        )
        .await
        .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_address() {
        let mut state = test_state();
        state.config.api.host = "not an address".to_string();
        let server = ApiServer::with_state(state);

        let (_tx, rx) = watch::channel(false);
        let err = server.run(rx).await.unwrap_err();
        assert!(matches!(err, CheckerError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown_signal() {
        let server = ApiServer::with_state(test_state());

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move { server.run(rx).await });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
