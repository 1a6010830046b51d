//! drinks.wiki catalog service binary.
//!
//! # Configuration
//!
//! - `MONGO_URL` - MongoDB connection string (default: `mongodb://localhost/drinks`)
//! - `SERVICE_PORT` - HTTP port (default: 3000)
//! - `STRICT_NOT_FOUND` - answer lookup misses with 404 instead of `null`
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint

use tracing::{error, info};

use drinks_service::router;
use drinks_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("drinks");
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Metrics are optional.
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        service = logging_config.service.as_deref().unwrap_or("drinks"),
        mongo_url = %config.redacted_mongo_url(),
        port = config.port,
        strict_not_found = config.strict_not_found,
        "starting catalog service"
    );

    let state = AppState::connect(&config).await.map_err(|e| {
        error!(error = %e, "failed to create application state");
        e
    })?;

    let app = router(state.clone(), &metrics_config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    info!("catalog service stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("received shutdown signal, draining connections");
}
