//! Liveness and readiness probes.
//!
//! Liveness never touches the document store. Readiness pings it and answers
//! 503 while it is unreachable.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Ok,
    NotReady,
}

/// Probe body, e.g. `{"status":"ok","service":"drinks-service-shared","version":"0.1.0"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ProbeStatus,
    pub service: String,
    pub version: String,

    /// Set by the readiness probe only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_reachable: Option<bool>,

    /// Why the service is not ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl HealthStatus {
    fn for_crate(status: ProbeStatus) -> Self {
        Self {
            status,
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store_reachable: None,
            reason: None,
        }
    }

    pub fn live() -> Self {
        Self::for_crate(ProbeStatus::Ok)
    }

    pub fn ready() -> Self {
        Self {
            store_reachable: Some(true),
            ..Self::for_crate(ProbeStatus::Ok)
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            store_reachable: Some(false),
            reason: Some(reason.into()),
            ..Self::for_crate(ProbeStatus::NotReady)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ProbeStatus::Ok
    }
}

/// `GET /health/live`
pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus::live())
}

/// `GET /health/ready`
pub async fn health_ready(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.store().ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::ready())),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::unavailable("document store unreachable")),
            )
        }
    }
}
