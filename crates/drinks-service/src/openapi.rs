//! `OpenAPI` (3.1) document for the catalog routes.

use utoipa::OpenApi;

/// `OpenAPI` documentation for the four catalog routes.
///
/// Documentation, probe and metrics routes are not listed.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "drinks.wiki api docs",
        version = env!("CARGO_PKG_VERSION"),
        description = "Read-only catalog of cocktails and their ingredients"
    ),
    servers(
        (url = "https://api.drinks.wiki")
    ),
    paths(
        crate::routes::drinks::list_drinks,
        crate::routes::drinks::get_drink,
        crate::routes::ingredients::list_ingredients,
        crate::routes::ingredients::get_ingredient,
    ),
    components(
        schemas(
            drinks_service_shared::ProblemDetails,
            drinks_service_shared::IngredientView,
            drinks_service_shared::DrinkSummary,
            drinks_service_shared::DrinkIngredientView,
            drinks_service_shared::DrinkView,
            drinks_service_shared::DrinksResponse,
            drinks_service_shared::DrinkResponse,
            drinks_service_shared::IngredientsResponse,
            drinks_service_shared::IngredientResponse,
        )
    ),
    tags(
        (name = "drinks", description = "Cocktails and their recipes"),
        (name = "ingredients", description = "Ingredients used in recipes"),
    ),
)]
pub struct ApiDoc;

/// Returns the generated `OpenAPI` document.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
