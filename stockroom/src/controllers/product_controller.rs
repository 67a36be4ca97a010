use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use stockroom_core::{HttpError, ManagedResource, PathParam, ValidJson, ValidQuery};
use stockroom_data::{PageRequest, Repository};
use stockroom_openapi::RouteInfo;

use crate::models::{Product, ProductCreate, ProductUpdate};
use crate::state::{AppState, SqliteTx};

const NOT_FOUND: &str = "Product not found";

/// `/products` and `/products/{id}`, relative to the configured API prefix.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create).get(list))
        .route("/products/{id}", get(get_by_id).put(update).delete(delete))
}

/// OpenAPI metadata for [`routes`], with paths under `prefix`.
pub fn api_doc(prefix: &str) -> Vec<RouteInfo> {
    let collection = format!("{prefix}/products");
    let item = format!("{prefix}/products/{{id}}");
    vec![
        RouteInfo::new("POST", &collection, "create_product")
            .tag("products")
            .summary("Create a product")
            .body::<ProductCreate>()
            .returns::<Product>(201, "Created product")
            .validation_error(),
        RouteInfo::new("GET", &collection, "list_products")
            .tag("products")
            .summary("List products in id order")
            .query_param("skip", "integer", false)
            .query_param("limit", "integer", false)
            .returns_list::<Product>(200, "A window of products")
            .validation_error(),
        RouteInfo::new("GET", &item, "get_product")
            .tag("products")
            .summary("Fetch one product")
            .path_param("id", "integer")
            .returns::<Product>(200, "The product")
            .error(404, NOT_FOUND)
            .validation_error(),
        RouteInfo::new("PUT", &item, "update_product")
            .tag("products")
            .summary("Update the fields present in the body")
            .path_param("id", "integer")
            .body::<ProductUpdate>()
            .returns::<Product>(200, "The updated product")
            .error(404, NOT_FOUND)
            .validation_error(),
        RouteInfo::new("DELETE", &item, "delete_product")
            .tag("products")
            .summary("Delete a product")
            .path_param("id", "integer")
            .no_content("Deleted")
            .error(404, NOT_FOUND)
            .validation_error(),
    ]
}

async fn commit(tx: SqliteTx) -> Result<(), HttpError> {
    <SqliteTx as ManagedResource<AppState>>::release(tx, true).await
}

async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), HttpError> {
    let mut tx = SqliteTx::acquire(&state).await?;
    let product = state.products.create(tx.conn(), &body).await?;
    commit(tx).await?;

    tracing::info!(id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn list(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<PageRequest>,
) -> Result<Json<Vec<Product>>, HttpError> {
    let mut tx = SqliteTx::acquire(&state).await?;
    let products = state.products.list(tx.conn(), page).await?;
    commit(tx).await?;
    Ok(Json(products))
}

async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Product>, HttpError> {
    let mut tx = SqliteTx::acquire(&state).await?;
    let product = state.products.get(tx.conn(), id).await?;
    commit(tx).await?;

    product
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(NOT_FOUND.into()))
}

async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidJson(body): ValidJson<ProductUpdate>,
) -> Result<Json<Product>, HttpError> {
    let mut tx = SqliteTx::acquire(&state).await?;
    let product = state
        .products
        .update(tx.conn(), id, &body)
        .await?
        .ok_or_else(|| HttpError::NotFound(NOT_FOUND.into()))?;
    commit(tx).await?;

    tracing::info!(id, "Product updated");
    Ok(Json(product))
}

async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, HttpError> {
    let mut tx = SqliteTx::acquire(&state).await?;
    let deleted = state.products.delete(tx.conn(), id).await?;
    if !deleted {
        return Err(HttpError::NotFound(NOT_FOUND.into()));
    }
    commit(tx).await?;

    tracing::info!(id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
