//! HTTP-level tests for the catalog routes, run against the fixture catalog.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use drinks_lib::{
    CatalogStore, DrinkRecord, Error as LibError, ExpandedDrink, Ingredient, MemoryStore, Page,
    Result as LibResult,
};
use drinks_service::router;
use drinks_service_shared::test_utils::{fixture_slugs, test_state};
use drinks_service_shared::{AppState, MetricsConfig};

fn server(state: AppState) -> TestServer {
    TestServer::new(router(state, &MetricsConfig::default())).expect("test server")
}

fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_str().expect("id").to_string())
        .collect()
}

/// Store whose every call fails, counting how often it was reached.
#[derive(Debug, Default)]
struct FailingStore {
    calls: AtomicUsize,
}

impl FailingStore {
    fn fail<T>(&self) -> LibResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LibError::InvalidRecord {
            message: "collection unavailable".to_string(),
        })
    }
}

#[async_trait]
impl CatalogStore for FailingStore {
    async fn find_drinks(&self, _page: Page) -> LibResult<Vec<DrinkRecord>> {
        self.fail()
    }

    async fn find_drink_by_id(&self, _id: &str) -> LibResult<Option<ExpandedDrink>> {
        self.fail()
    }

    async fn find_ingredients(&self, _page: Page) -> LibResult<Vec<Ingredient>> {
        self.fail()
    }

    async fn find_ingredient_by_id(&self, _id: &str) -> LibResult<Option<Ingredient>> {
        self.fail()
    }

    async fn ping(&self) -> LibResult<()> {
        self.fail()
    }

    async fn shutdown(&self) {}
}

// =============================================================================
// GET /drinks
// =============================================================================

#[tokio::test]
async fn list_drinks_defaults_to_natural_order() {
    let response = server(test_state()).get("/drinks").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        ids(&body["drinks"]),
        vec![
            fixture_slugs::BLUE_KAMIKAZE,
            fixture_slugs::KAMIKAZE,
            fixture_slugs::SCREWDRIVER,
            fixture_slugs::GHOST_SOUR,
        ]
    );
}

#[tokio::test]
async fn list_drinks_applies_skip_and_limit() {
    let response = server(test_state())
        .get("/drinks")
        .add_query_param("limit", 2)
        .add_query_param("skip", 1)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        ids(&body["drinks"]),
        vec![fixture_slugs::KAMIKAZE, fixture_slugs::SCREWDRIVER]
    );
}

#[tokio::test]
async fn list_drinks_skip_past_end_is_empty() {
    let response = server(test_state())
        .get("/drinks")
        .add_query_param("skip", 50)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "drinks": [] }));
}

#[tokio::test]
async fn list_drinks_omits_recipe() {
    let response = server(test_state())
        .get("/drinks")
        .add_query_param("limit", 1)
        .await;

    let body: Value = response.json();
    let first = &body["drinks"][0];
    assert_eq!(first["name"], "Blue Kamikaze");
    assert_eq!(first["tags"], json!(["shot", "blue"]));
    assert_eq!(
        first["imageUrl"],
        "https://images.drinks.wiki/drinks/blue-kamikaze.png"
    );
    assert!(first.get("ingredients").is_none());
}

#[tokio::test]
async fn list_drinks_rejects_out_of_range_limits() {
    let server = server(test_state());

    for limit in ["0", "101", "-3"] {
        let response = server.get("/drinks").add_query_param("limit", limit).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let problem: Value = response.json();
        assert_eq!(problem["type"], "/problems/invalid-request");
        assert_eq!(problem["status"], 400);
    }
}

#[tokio::test]
async fn list_drinks_accepts_limit_bounds() {
    let server = server(test_state());

    for limit in [1, 100] {
        server
            .get("/drinks")
            .add_query_param("limit", limit)
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn list_drinks_rejects_negative_skip_and_garbage() {
    let server = server(test_state());

    server
        .get("/drinks")
        .add_query_param("skip", -1)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/drinks")
        .add_query_param("limit", "lots")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_paging_never_reaches_the_store() {
    let store = Arc::new(FailingStore::default());
    let server = server(AppState::from_store(store.clone()));

    let response = server
        .get("/ingredients")
        .add_query_param("limit", 1000)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn problem_responses_use_problem_content_type() {
    let response = server(test_state())
        .get("/drinks")
        .add_query_param("limit", 0)
        .await;

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");
}

// =============================================================================
// GET /drinks/{id}
// =============================================================================

#[tokio::test]
async fn get_drink_expands_ingredients_in_order() {
    let response = server(test_state())
        .get(&format!("/drinks/{}", fixture_slugs::BLUE_KAMIKAZE))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let drink = &body["drink"];
    assert_eq!(drink["id"], fixture_slugs::BLUE_KAMIKAZE);

    let lines = drink["ingredients"].as_array().expect("ingredients");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["ingredient"]["id"], fixture_slugs::VODKA);
    assert_eq!(lines[0]["amount"], 1.0);
    assert_eq!(lines[0]["amountUnit"], "part");
    assert_eq!(
        lines[1]["ingredient"],
        json!({
            "id": "blue-curacau",
            "name": "Blue Curaçau",
            "imageUrl": "https://images.drinks.wiki/ingredients/blue-curacau.png"
        })
    );
    assert_eq!(lines[2]["ingredient"]["id"], fixture_slugs::LIME_JUICE);
}

#[tokio::test]
async fn get_drink_dangling_reference_is_null() {
    let response = server(test_state())
        .get(&format!("/drinks/{}", fixture_slugs::GHOST_SOUR))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let lines = &body["drink"]["ingredients"];
    assert!(lines[0]["ingredient"].is_null());
    assert_eq!(lines[0]["amount"], 2.0);
    assert_eq!(lines[1]["ingredient"]["id"], fixture_slugs::LIME_JUICE);
}

#[tokio::test]
async fn get_drink_miss_is_null_by_default() {
    let response = server(test_state()).get("/drinks/nonexistent").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "drink": null }));
}

#[tokio::test]
async fn get_drink_miss_is_404_in_strict_mode() {
    let state = test_state().with_strict_not_found(true);
    let response = server(state).get("/drinks/nonexistent").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let problem: Value = response.json();
    assert_eq!(problem["type"], "/problems/not-found");
    assert!(problem["detail"]
        .as_str()
        .unwrap_or_default()
        .contains("nonexistent"));
}

#[tokio::test]
async fn get_drink_storage_failure_is_generic_500() {
    let store = Arc::new(FailingStore::default());
    let response = server(AppState::from_store(store.clone()))
        .get("/drinks/blue-kamikaze")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let problem: Value = response.json();
    assert_eq!(problem["type"], "/problems/internal-error");
    assert!(!problem.to_string().contains("collection unavailable"));
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// GET /ingredients, GET /ingredient/{id}
// =============================================================================

#[tokio::test]
async fn list_ingredients_pages() {
    let server = server(test_state());

    let body: Value = server.get("/ingredients").await.json();
    assert_eq!(body["ingredients"].as_array().map(Vec::len), Some(5));

    let body: Value = server
        .get("/ingredients")
        .add_query_param("limit", 2)
        .add_query_param("skip", 3)
        .await
        .json();
    assert_eq!(
        ids(&body["ingredients"]),
        vec![fixture_slugs::TRIPLE_SEC, fixture_slugs::ORANGE_JUICE]
    );
}

#[tokio::test]
async fn inserted_ingredient_round_trips() {
    let store = MemoryStore::new();
    store.insert_ingredient(Ingredient::new("blue-curacau", "Blue Curaçau"));
    let server = server(AppState::from_store(Arc::new(store)));

    let response = server.get("/ingredient/blue-curacau").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "ingredient": { "id": "blue-curacau", "name": "Blue Curaçau" } })
    );
}

#[tokio::test]
async fn get_ingredient_miss() {
    let response = server(test_state()).get("/ingredient/nonexistent").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ingredient": null }));

    let strict = server(test_state().with_strict_not_found(true));
    strict
        .get("/ingredient/nonexistent")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// Docs, probes, middleware
// =============================================================================

#[tokio::test]
async fn docs_page_is_served() {
    let response = server(test_state()).get("/docs").await;
    response.assert_status_ok();
    assert!(response.text().contains("swagger-ui"));
}

#[tokio::test]
async fn openapi_document_lists_the_four_routes() {
    let response = server(test_state()).get("/docs/json").await;
    response.assert_status_ok();

    let doc: Value = response.json();
    let mut paths: Vec<_> = doc["paths"]
        .as_object()
        .expect("paths")
        .keys()
        .cloned()
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec!["/drinks", "/drinks/{id}", "/ingredient/{id}", "/ingredients"]
    );
    assert_eq!(doc["info"]["title"], "drinks.wiki api docs");
    assert_eq!(doc["paths"]["/drinks"]["get"]["security"], json!([{}]));
}

#[tokio::test]
async fn readiness_reflects_store_health() {
    server(test_state())
        .get("/health/ready")
        .await
        .assert_status_ok();

    let failing = server(AppState::from_store(Arc::new(FailingStore::default())));
    failing
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
    failing.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let server = server(test_state());

    let response = server
        .get("/drinks")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-abc"),
        )
        .await;
    assert_eq!(
        response.headers().get("x-request-id"),
        Some(&HeaderValue::from_static("req-abc"))
    );

    let response = server.get("/drinks").add_query_param("limit", 0).await;
    let generated = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(generated.len(), 36);
    let problem: Value = response.json();
    assert_eq!(problem["instance"], generated);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = server(test_state())
        .get("/drinks")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("https://drinks.wiki"),
        )
        .await;

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}
