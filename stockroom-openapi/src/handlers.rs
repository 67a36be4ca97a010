use axum::http::header;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::builder::{build_spec, OpenApiConfig};
use crate::route::RouteInfo;

pub const SPEC_PATH: &str = "/openapi.json";
pub const DOCS_PATH: &str = "/docs";
pub const REDOC_PATH: &str = "/redoc";

const SWAGGER_UI: &str = "https://unpkg.com/swagger-ui-dist@5";
const REDOC_BUNDLE: &str = "https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js";

/// Routes serving the generated document at [`SPEC_PATH`].
///
/// When `docs_ui` is set, Swagger UI is served at [`DOCS_PATH`] and ReDoc at
/// [`REDOC_PATH`]; both load the document from [`SPEC_PATH`].
pub fn openapi_routes<S>(config: OpenApiConfig, routes: &[RouteInfo]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let spec = build_spec(&config, routes).to_string();
    let mut router = Router::new().route(
        SPEC_PATH,
        get(move || {
            let spec = spec.clone();
            async move { ([(header::CONTENT_TYPE, "application/json")], spec) }
        }),
    );

    if config.docs_ui {
        let title = escape_html(&config.title);
        let docs = swagger_page(&title);
        let redoc = redoc_page(&title);
        router = router
            .route(DOCS_PATH, get(move || std::future::ready(Html(docs.clone()))))
            .route(REDOC_PATH, get(move || std::future::ready(Html(redoc.clone()))));
    }
    router
}

fn swagger_page(title: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - Swagger UI</title>
  <link rel="stylesheet" href="{SWAGGER_UI}/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="{SWAGGER_UI}/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{SPEC_PATH}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##
    )
}

fn redoc_page(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - ReDoc</title>
</head>
<body>
  <redoc spec-url="{SPEC_PATH}"></redoc>
  <script src="{REDOC_BUNDLE}"></script>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
