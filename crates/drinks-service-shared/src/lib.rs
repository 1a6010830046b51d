//! Shared infrastructure for the drinks.wiki HTTP service.
//!
//! This crate provides the HTTP glue between `drinks-lib` and the router:
//!
//! - [`AppState`]: handle to the catalog store shared by all handlers
//! - [`ServiceConfig`]: environment-driven service configuration
//! - [`health`]: liveness and readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`views`]: JSON shapes returned by the catalog routes
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`PageQuery`]: `limit` / `skip` query parameters with validation
//!
//! # Architecture
//!
//! Handlers stay thin. Storage and record expansion live in `drinks-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse and validate query parameters                      │
//! │  - Call the CatalogStore                                    │
//! │  - Map records to views                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture catalog and state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod state;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, DEFAULT_PORT};
pub use health::{health_live, health_ready, HealthStatus, ProbeStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_catalog_query, record_items_returned,
    record_lookup_miss, record_storage_error, MetricsConfig, MetricsError, ENTITY_DRINK,
    ENTITY_INGREDIENT, OP_LIST, OP_LOOKUP,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_NOT_FOUND,
};
pub use request::{page_from_query, PageQuery, Validate};
pub use state::{AppState, AppStateError};
pub use views::{
    DrinkIngredientView, DrinkResponse, DrinkSummary, DrinkView, DrinksResponse,
    IngredientResponse, IngredientView, IngredientsResponse,
};
