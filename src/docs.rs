use axum::{http::StatusCode, response::IntoResponse};

/// Path of the OpenAPI document served by [`serve_openapi_spec`].
pub const OPENAPI_PATH: &str = "openapi.yml";

/// Serves the OpenAPI specification YAML file.
///
/// Reads `openapi.yml` from the working directory on each request; a missing
/// file yields 404.
pub async fn serve_openapi_spec() -> impl IntoResponse {
    match tokio::fs::read_to_string(OPENAPI_PATH).await {
        Ok(content) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/yaml")],
            content,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!("OpenAPI spec not readable at {}: {}", OPENAPI_PATH, e);
            (StatusCode::NOT_FOUND, "OpenAPI spec not found.").into_response()
        }
    }
}

/// Serves a Swagger UI page that loads `/api-docs/openapi.yml`.
pub async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CxC Reporting API - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.yml",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}
