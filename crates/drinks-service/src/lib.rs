//! drinks.wiki catalog HTTP service.
//!
//! # Endpoints
//!
//! - `GET /drinks` - Page through drinks (`limit`, `skip`)
//! - `GET /drinks/{id}` - One drink with its ingredients expanded
//! - `GET /ingredients` - Page through ingredients (`limit`, `skip`)
//! - `GET /ingredient/{id}` - One ingredient
//! - `GET /docs` - Swagger UI, `GET /docs/json` - `OpenAPI` document
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - liveness probe
//! - `GET /health/ready` - readiness probe (pings the document store)

#![deny(warnings)]

pub mod docs;
pub mod openapi;
pub mod routes;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use drinks_service_shared::{
    health_live, health_ready, metrics_handler, AppState, MetricsConfig, MetricsLayer,
};

/// Build the service router over `state`.
///
/// The metrics endpoint is mounted at `metrics.path` unless metrics are
/// disabled.
pub fn router(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut app = Router::new()
        .route("/drinks", get(routes::drinks::list_drinks))
        .route("/drinks/{id}", get(routes::drinks::get_drink))
        .route("/ingredients", get(routes::ingredients::list_ingredients))
        .route("/ingredient/{id}", get(routes::ingredients::get_ingredient))
        .route("/docs", get(docs::swagger_ui))
        .route(docs::OPENAPI_JSON_PATH, get(docs::openapi_json))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        app = app.route(&metrics.path, get(metrics_handler));
    }

    app.layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}
