//! `GET /ingredients` and `GET /ingredient/{id}`.

use axum::extract::{rejection::QueryRejection, Path, Query, State};
use tracing::{debug, error};

use drinks_service_shared::{
    from_lib_error, page_from_query, record_catalog_query, record_items_returned,
    record_lookup_miss, record_storage_error, AppState, IngredientResponse, IngredientView,
    IngredientsResponse, PageQuery, ProblemDetails, RequestId, ENTITY_INGREDIENT, OP_LIST,
    OP_LOOKUP,
};

use super::Reply;

#[utoipa::path(
    get,
    path = "/ingredients",
    tag = "ingredients",
    params(PageQuery),
    responses(
        (status = 200, description = "A page of ingredients", body = IngredientsResponse),
        (status = 400, description = "Invalid paging parameters", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = ProblemDetails,
            content_type = "application/problem+json"),
    ),
    security(())
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Reply<IngredientsResponse> {
    let page = match page_from_query(query, request_id.as_str()) {
        Ok(page) => page,
        Err(problem) => return problem.into(),
    };

    record_catalog_query(ENTITY_INGREDIENT, OP_LIST);

    match state.store().find_ingredients(page).await {
        Ok(ingredients) => {
            record_items_returned(ENTITY_INGREDIENT, ingredients.len());
            debug!(
                skip = page.skip(),
                limit = page.limit(),
                returned = ingredients.len(),
                "listed ingredients"
            );
            Reply::Success(IngredientsResponse {
                ingredients: ingredients.into_iter().map(IngredientView::from).collect(),
            })
        }
        Err(e) => {
            error!(error = %e, "listing ingredients failed");
            record_storage_error(ENTITY_INGREDIENT, OP_LIST);
            Reply::Problem(from_lib_error(&e, request_id.as_str()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/ingredient/{id}",
    tag = "ingredients",
    params(
        ("id" = String, Path, description = "Ingredient slug", example = "blue-curacau")
    ),
    responses(
        (status = 200, description = "The ingredient, or null when no ingredient has this id",
            body = IngredientResponse),
        (status = 404, description = "No ingredient has this id (strict mode only)",
            body = ProblemDetails, content_type = "application/problem+json"),
        (status = 500, description = "Internal error", body = ProblemDetails,
            content_type = "application/problem+json"),
    ),
    security(())
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> Reply<IngredientResponse> {
    record_catalog_query(ENTITY_INGREDIENT, OP_LOOKUP);

    match state.store().find_ingredient_by_id(&id).await {
        Ok(Some(ingredient)) => Reply::Success(IngredientResponse {
            ingredient: Some(IngredientView::from(ingredient)),
        }),
        Ok(None) => {
            record_lookup_miss(ENTITY_INGREDIENT);
            debug!(id = %id, "no ingredient with this id");
            if state.strict_not_found() {
                Reply::Problem(ProblemDetails::not_found(
                    "ingredient",
                    &id,
                    request_id.as_str(),
                ))
            } else {
                Reply::Success(IngredientResponse { ingredient: None })
            }
        }
        Err(e) => {
            error!(id = %id, error = %e, "ingredient lookup failed");
            record_storage_error(ENTITY_INGREDIENT, OP_LOOKUP);
            Reply::Problem(from_lib_error(&e, request_id.as_str()))
        }
    }
}
