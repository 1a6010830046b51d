//! Error bodies in the RFC 9457 `application/problem+json` format.
//!
//! <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use drinks_lib::Error as LibError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for a slug that matches no entity (strict lookups only).
pub const PROBLEM_NOT_FOUND: &str = "/problems/not-found";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// The problems this service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProblemKind {
    InvalidRequest,
    NotFound,
    Internal,
}

impl ProblemKind {
    fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => PROBLEM_INVALID_REQUEST,
            ProblemKind::NotFound => PROBLEM_NOT_FOUND,
            ProblemKind::Internal => PROBLEM_INTERNAL_ERROR,
        }
    }

    fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::NotFound => "Not Found",
            ProblemKind::Internal => "Internal Error",
        }
    }

    fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ProblemKind::NotFound => StatusCode::NOT_FOUND,
            ProblemKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A problem document.
///
/// ```
/// use drinks_service_shared::{ProblemDetails, PROBLEM_INVALID_REQUEST};
///
/// let problem = ProblemDetails::bad_request("The 'limit' parameter cannot exceed 100", "req-7");
/// assert_eq!(problem.type_uri, PROBLEM_INVALID_REQUEST);
/// assert_eq!(problem.status, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProblemDetails {
    /// Relative URI naming the kind of problem.
    #[serde(rename = "type")]
    #[schema(example = "/problems/invalid-request")]
    pub type_uri: String,

    #[schema(example = "Invalid Request")]
    pub title: String,

    #[schema(example = 400)]
    pub status: u16,

    /// What went wrong with this particular request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// The `x-request-id` of the failing request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    fn of(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(kind.type_uri(), kind.title(), kind.status())
            .with_detail(detail)
            .with_request_id(request_id)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for parameters that fail validation or cannot be parsed.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// 404 for a slug lookup that matched nothing.
    pub fn not_found(entity: &str, id: &str, request_id: impl Into<String>) -> Self {
        Self::of(
            ProblemKind::NotFound,
            format!("No {} with id '{}'", entity, id),
            request_id,
        )
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::of(ProblemKind::Internal, detail, request_id)
    }

    /// `status` as a [`StatusCode`]; out-of-range values become 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({}): {}", self.title, self.status, detail),
            None => write!(f, "{} ({})", self.title, self.status),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(CONTENT_TYPE, HeaderValue::from_static(PROBLEM_CONTENT_TYPE))],
            Json(self),
        )
            .into_response()
    }
}

/// Map a library error onto the problem reported to the client.
///
/// Only paging errors carry their message through. Everything else is a
/// generic 500 and the caller logs the underlying error.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::InvalidPage { .. } => ProblemDetails::bad_request(error.to_string(), request_id),
        LibError::InvalidRecord { .. } | LibError::Storage(_) => {
            ProblemDetails::internal_error("The catalog store request failed", request_id)
        }
    }
}
