//! `GET /drinks` and `GET /drinks/{id}`.

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use tracing::{debug, error};

use drinks_service_shared::{
    from_lib_error, page_from_query, record_catalog_query, record_items_returned,
    record_lookup_miss, record_storage_error, AppState, DrinkResponse, DrinkSummary, DrinkView,
    DrinksResponse, PageQuery, ProblemDetails, RequestId, ENTITY_DRINK, OP_LIST, OP_LOOKUP,
};

use super::Reply;

/// List drinks in storage order. Recipes are not included.
#[utoipa::path(
    get,
    path = "/drinks",
    tag = "drinks",
    params(PageQuery),
    responses(
        (status = 200, description = "A page of drinks", body = DrinksResponse),
        (status = 400, description = "Invalid paging parameters", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = ProblemDetails,
            content_type = "application/problem+json"),
    ),
    security(())
)]
pub async fn list_drinks(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Reply<DrinksResponse> {
    let page = match page_from_query(query, request_id.as_str()) {
        Ok(page) => page,
        Err(problem) => return problem.into(),
    };

    record_catalog_query(ENTITY_DRINK, OP_LIST);

    match state.store().find_drinks(page).await {
        Ok(records) => {
            record_items_returned(ENTITY_DRINK, records.len());
            debug!(
                skip = page.skip(),
                limit = page.limit(),
                returned = records.len(),
                "listed drinks"
            );
            Reply::Success(DrinksResponse {
                drinks: records.iter().map(DrinkSummary::from).collect(),
            })
        }
        Err(e) => {
            error!(error = %e, "listing drinks failed");
            record_storage_error(ENTITY_DRINK, OP_LIST);
            Reply::Problem(from_lib_error(&e, request_id.as_str()))
        }
    }
}

/// Fetch one drink by slug with its ingredients expanded.
#[utoipa::path(
    get,
    path = "/drinks/{id}",
    tag = "drinks",
    params(
        ("id" = String, Path, description = "Drink slug", example = "blue-kamikaze")
    ),
    responses(
        (status = 200, description = "The drink, or null when no drink has this id",
            body = DrinkResponse),
        (status = 404, description = "No drink has this id (strict mode only)",
            body = ProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = ProblemDetails,
            content_type = "application/problem+json"),
    ),
    security(())
)]
pub async fn get_drink(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Reply<DrinkResponse> {
    record_catalog_query(ENTITY_DRINK, OP_LOOKUP);

    match state.store().find_drink_by_id(&id).await {
        Ok(Some(drink)) => Reply::Success(DrinkResponse {
            drink: Some(DrinkView::from(drink)),
        }),
        Ok(None) => {
            record_lookup_miss(ENTITY_DRINK);
            debug!(id = %id, "no drink with this id");
            if state.strict_not_found() {
                Reply::Problem(ProblemDetails::not_found(
                    "drink",
                    &id,
                    request_id.as_str(),
                ))
            } else {
                Reply::Success(DrinkResponse { drink: None })
            }
        }
        Err(e) => {
            error!(id = %id, error = %e, "drink lookup failed");
            record_storage_error(ENTITY_DRINK, OP_LOOKUP);
            Reply::Problem(from_lib_error(&e, request_id.as_str()))
        }
    }
}
