use std::sync::Arc;

use axum::Router;
use stockroom_core::{catch_panic_layer, default_trace, request_timeout, HealthRegistry};
use stockroom_data::pool::{connect, ensure_schema};
use stockroom_data::{DataResult, PoolHealth, Repository, SqlxErrorExt};
use stockroom_openapi::{openapi_routes, OpenApiConfig};

use crate::controllers::{product_controller, root_controller};
use crate::repository::{ProductRepository, SCHEMA};
use crate::settings::Settings;
use crate::state::AppState;

/// Open the store, create the schema if needed and assemble the shared state.
pub async fn init_state(settings: &Settings) -> DataResult<AppState> {
    let pool = connect(&settings.database.url, settings.database.max_connections).await?;
    ensure_schema(&pool, SCHEMA).await?;

    let products = ProductRepository::new()?;
    let mut conn = pool.acquire().await.map_err(SqlxErrorExt::into_data_error)?;
    let stored = products.count(&mut conn).await?;
    drop(conn);
    tracing::info!(products = stored, "Product store ready");

    Ok(AppState {
        pool,
        products,
        app: Arc::new(settings.app.clone()),
    })
}

/// Build the full HTTP surface: root metadata, product routes under the
/// configured prefix, the OpenAPI document, health checks and request layers.
pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let prefix = settings.app.api_prefix.as_str();
    let api = if prefix.is_empty() {
        product_controller::routes()
    } else {
        Router::new().nest(prefix, product_controller::routes())
    };

    let docs = OpenApiConfig::new(&settings.app.name, &settings.app.version)
        .with_description("Create, read, update and delete inventory products.")
        .with_docs_ui(settings.app.docs_enabled);
    let openapi = openapi_routes(docs, &product_controller::api_doc(prefix));

    let health = HealthRegistry::new()
        .check(PoolHealth::new(state.pool.clone()))
        .router();

    let mut router = Router::new()
        .merge(root_controller::routes())
        .merge(api)
        .with_state(state)
        .merge(openapi)
        .merge(health);

    if let Some(secs) = settings.server.request_timeout_secs {
        router = router.layer(request_timeout(secs));
    }

    router.layer(default_trace()).layer(catch_panic_layer())
}
