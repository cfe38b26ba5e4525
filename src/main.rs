//! Proxy Checker - Entry Point
//!
//! Starts the API server with graceful shutdown support.

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use proxy_checker::api::ApiServer;
use proxy_checker::config::{Config, LogConfig};
use proxy_checker::error;

#[tokio::main]
async fn main() -> error::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    init_tracing(&config.log);

    info!("Starting Proxy Checker API");
    info!(
        "Check URL: {}, default timeout: {}s, max proxies per batch: {}",
        config.checker.check_url, config.checker.default_timeout, config.checker.max_proxies
    );

    let api_server = ApiServer::new(config);
    if let Err(e) = api_server.serve(shutdown_signal()).await {
        error!("API server error: {}", e);
        return Err(e);
    }

    info!("Proxy Checker API stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("proxy_checker={},tower_http=debug", log.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if log.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
