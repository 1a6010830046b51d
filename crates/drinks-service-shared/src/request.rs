//! Request parameter types and validation for HTTP endpoints.

use axum::extract::{rejection::QueryRejection, Query};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use drinks_lib::{Page, DEFAULT_LIMIT, MAX_LIMIT};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Offset/limit query parameters shared by the list endpoints.
///
/// Values are kept signed so that negative input reaches [`Validate`] and is
/// reported with a field-specific message instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of items to return.
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub limit: Option<i64>,

    /// Number of items to skip.
    #[param(minimum = 0, default = 0)]
    pub skip: Option<i64>,
}

impl PageQuery {
    pub fn new(limit: Option<i64>, skip: Option<i64>) -> Self {
        Self { limit, skip }
    }

    /// Validate and convert into a library [`Page`].
    pub fn to_page(&self, request_id: &str) -> Result<Page, Box<ProblemDetails>> {
        self.validate(request_id)?;
        let limit = self.limit.unwrap_or(i64::from(DEFAULT_LIMIT));
        let skip = self.skip.unwrap_or(0);
        // Both are in range after validation.
        Page::new(skip as u64, limit as u32)
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

impl Validate for PageQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if let Some(limit) = self.limit {
            if limit < 1 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'limit' parameter must be at least 1",
                    request_id,
                )));
            }

            if limit > i64::from(MAX_LIMIT) {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("The 'limit' parameter cannot exceed {}", MAX_LIMIT),
                    request_id,
                )));
            }
        }

        if let Some(skip) = self.skip {
            if skip < 0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'skip' parameter must not be negative",
                    request_id,
                )));
            }
        }

        Ok(())
    }
}

/// Resolve the page for a list endpoint from the raw query extraction.
///
/// Parse failures (non-integer values, unknown encodings) and range
/// violations both become `400 Invalid Request`.
pub fn page_from_query(
    query: Result<Query<PageQuery>, QueryRejection>,
    request_id: &str,
) -> Result<Page, Box<ProblemDetails>> {
    match query {
        Ok(Query(query)) => query.to_page(request_id),
        Err(rejection) => Err(Box::new(ProblemDetails::bad_request(
            rejection.body_text(),
            request_id,
        ))),
    }
}
