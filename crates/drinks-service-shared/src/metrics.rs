//! Prometheus metrics for the catalog service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Install the Prometheus recorder
//! - [`metrics_handler`]: Axum handler for `/metrics`
//! - Catalog query helpers
//!
//! ```no_run
//! use drinks_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! init_metrics(&MetricsConfig::default()).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route("/metrics", get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Catalog entity label values.
pub const ENTITY_DRINK: &str = "drink";
pub const ENTITY_INGREDIENT: &str = "ingredient";

/// Catalog operation label values.
pub const OP_LIST: &str = "list";
pub const OP_LOOKUP: &str = "lookup";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route the exposition endpoint is mounted at.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// - `METRICS_ENABLED`: anything but "false" enables (default: true)
    /// - `METRICS_PATH`: endpoint path (default: "/metrics")
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH").unwrap_or_else(|_| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder. Must run before anything is recorded.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed, or
/// when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// Axum handler rendering the Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Catalog Metrics Helpers
// =============================================================================

/// Count a catalog query (`catalog_queries_total`).
pub fn record_catalog_query(entity: &'static str, operation: &'static str) {
    metrics::counter!(
        "catalog_queries_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}

/// Record how many items a list query returned (`catalog_items_returned`).
pub fn record_items_returned(entity: &'static str, count: usize) {
    metrics::histogram!("catalog_items_returned", "entity" => entity).record(count as f64);
}

/// Count a slug lookup that matched nothing (`catalog_lookup_misses_total`).
pub fn record_lookup_miss(entity: &'static str) {
    metrics::counter!("catalog_lookup_misses_total", "entity" => entity).increment(1);
}

/// Count a failed store call (`catalog_storage_errors_total`).
pub fn record_storage_error(entity: &'static str, operation: &'static str) {
    metrics::counter!(
        "catalog_storage_errors_total",
        "entity" => entity,
        "operation" => operation
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_disabled_metrics_refuse_to_install() {
        let config = MetricsConfig {
            enabled: false,
            ..MetricsConfig::default()
        };
        assert_eq!(init_metrics(&config), Err(MetricsError::Disabled));
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert!(MetricsError::InstallFailed("port".to_string())
            .to_string()
            .contains("port"));
    }

    #[test]
    fn test_helpers_without_recorder_are_noops() {
        record_catalog_query(ENTITY_DRINK, OP_LIST);
        record_items_returned(ENTITY_DRINK, 3);
        record_lookup_miss(ENTITY_INGREDIENT);
        record_storage_error(ENTITY_INGREDIENT, OP_LOOKUP);
    }
}
