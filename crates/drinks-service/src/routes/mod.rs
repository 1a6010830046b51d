//! Catalog route handlers.

pub mod drinks;
pub mod ingredients;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use drinks_service_shared::ProblemDetails;

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Success(T),
    Problem(ProblemDetails),
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        match self {
            Reply::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Reply::Problem(problem) => problem.into_response(),
        }
    }
}

impl<T> From<Box<ProblemDetails>> for Reply<T> {
    fn from(problem: Box<ProblemDetails>) -> Self {
        Reply::Problem(*problem)
    }
}
