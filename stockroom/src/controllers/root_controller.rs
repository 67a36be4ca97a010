use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use stockroom_openapi::{DOCS_PATH, REDOC_PATH};

use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub project: String,
    pub version: String,
    /// `null` when the documentation pages are disabled.
    pub docs_url: Option<String>,
    pub redoc_url: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}

async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    let link = |path: &str| state.app.docs_enabled.then(|| path.to_string());
    Json(ServiceInfo {
        project: state.app.name.clone(),
        version: state.app.version.clone(),
        docs_url: link(DOCS_PATH),
        redoc_url: link(REDOC_PATH),
    })
}
