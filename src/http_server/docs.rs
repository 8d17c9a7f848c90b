//! API Documentation Routes
//!
//! Serves the generated OpenAPI document and a Swagger UI page reading it.

use axum::{response::Html, routing::get, Json, Router};
use utoipa::OpenApi;

use crate::pizza::Pizza;

use super::errors::ErrorResponse;
use super::{pizza_routes, root_routes};

/// Where the OpenAPI document is served
pub const OPENAPI_JSON_PATH: &str = "/swagger/v1/swagger.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PizzaStore API",
        description = "Making the Pizzas you love",
        version = "v1"
    ),
    paths(
        root_routes::hello,
        pizza_routes::list_pizzas,
        pizza_routes::create_pizza,
        pizza_routes::get_pizza,
        pizza_routes::update_pizza,
        pizza_routes::delete_pizza,
    ),
    components(schemas(Pizza, ErrorResponse)),
    tags((name = "pizzas", description = "Pizza records"))
)]
pub struct ApiDoc;

/// The OpenAPI document for every route this service exposes
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>PizzaStore API v1</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({
        url: "/swagger/v1/swagger.json",
        dom_id: "#swagger-ui",
      });
    };
  </script>
</body>
</html>
"##;

/// Create documentation routes
pub fn docs_routes() -> Router {
    Router::new()
        .route(OPENAPI_JSON_PATH, get(openapi_handler))
        .route("/swagger", get(swagger_ui_handler))
        .route("/swagger/index.html", get(swagger_ui_handler))
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

async fn swagger_ui_handler() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}
