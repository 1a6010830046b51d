//! Interactive API documentation under `/docs`.

use axum::{
    response::{Html, IntoResponse},
    Json,
};

use crate::openapi::openapi;

/// Where the Swagger UI page fetches the document from.
pub const OPENAPI_JSON_PATH: &str = "/docs/json";

const SWAGGER_UI_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>drinks.wiki api docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({ url: "/docs/json", dom_id: "#swagger-ui" });
      };
    </script>
  </body>
</html>
"##;

/// `GET /docs`: Swagger UI rendering [`OPENAPI_JSON_PATH`].
pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_PAGE)
}

/// `GET /docs/json`: the `OpenAPI` document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(openapi())
}
