//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, markets};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feiras API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Street market registry"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "markets", description = "Street market records")
    ),
    paths(
        health::health,
        markets::list_markets,
        markets::create_market,
        markets::update_market,
        markets::delete_market,
    ),
    components(schemas(
        health::HealthResponse,
        markets::types::MarketDto,
        markets::types::CreateMarketRequest,
        markets::types::UpdateMarketRequest,
        markets::types::DeleteMarketResponse,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Feiras API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;
