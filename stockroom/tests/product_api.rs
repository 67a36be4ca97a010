mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use stockroom::models::{Product, ProductCreate};

fn smartphone() -> ProductCreate {
    ProductCreate {
        name: "Smartphone X".into(),
        description: None,
        price: 2999.99,
        quantity: 50,
    }
}

fn item(name: &str, price: f64, quantity: i64) -> ProductCreate {
    ProductCreate {
        name: name.into(),
        description: None,
        price,
        quantity,
    }
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = common::app().await;

    app.post_json("/products", &smartphone())
        .await
        .assert_created()
        .assert_at("/id", 1)
        .assert_at("/name", "Smartphone X")
        .assert_at("/description", Value::Null)
        .assert_at("/price", 2999.99)
        .assert_at("/quantity", 50);

    app.put_json("/products/1", &json!({ "quantity": 40 }))
        .await
        .assert_ok()
        .assert_at("/quantity", 40)
        .assert_at("/price", 2999.99)
        .assert_at("/name", "Smartphone X");

    app.get("/products/1").await.assert_ok().assert_at("/quantity", 40);

    app.delete("/products/1").await.assert_no_content();

    app.get("/products/1")
        .await
        .assert_not_found()
        .assert_error("Product not found");
}

#[tokio::test]
async fn test_create_returns_stored_product() {
    let app = common::app().await;
    let lamp = ProductCreate {
        description: Some("LED, warm white".into()),
        ..item("Desk Lamp", 49.5, 3)
    };

    let created: Product = app.post_json("/products", &lamp).await.assert_created().json();
    let fetched: Product = app
        .get(&format!("/products/{}", created.id))
        .await
        .assert_ok()
        .json();
    assert_eq!(created, fetched);
    assert_eq!(fetched.description.as_deref(), Some("LED, warm white"));
}

#[tokio::test]
async fn test_create_rejects_invalid_fields() {
    let app = common::app().await;

    app.post_json("/products", &item("Cable", 0.0, 1))
        .await
        .assert_field_error("price");
    app.post_json("/products", &item("Cable", 1.5, -1))
        .await
        .assert_field_error("quantity");
    app.post_json("/products", &item("", 1.5, 1))
        .await
        .assert_field_error("name");

    let wordy = ProductCreate {
        description: Some("d".repeat(301)),
        ..item("Cable", 1.5, 1)
    };
    app.post_json("/products", &wordy)
        .await
        .assert_field_error("description");

    let resp = app
        .post_json("/products", &item("", -1.0, -1))
        .await
        .assert_field_error("name");
    assert_eq!(resp.field_errors().len(), 3);

    app.get("/products").await.assert_ok().assert_len("", 0);
}

#[tokio::test]
async fn test_create_rejects_missing_or_mistyped_fields() {
    let app = common::app().await;

    app.post_json("/products", &json!({ "name": "Cable", "quantity": 1 }))
        .await
        .assert_field_error("body");
    app.post_json("/products", &json!({ "name": "Cable", "price": "cheap", "quantity": 1 }))
        .await
        .assert_field_error("body");
    app.post_raw("/products", "application/json", "{not json")
        .await
        .assert_field_error("body");
    app.post_raw("/products", "text/plain", "Cable")
        .await
        .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let app = common::app().await;

    let first = app
        .post_json("/products", &smartphone())
        .await
        .assert_created()
        .json::<Product>()
        .id;
    app.delete(&format!("/products/{first}"))
        .await
        .assert_no_content();

    let second = app
        .post_json("/products", &smartphone())
        .await
        .assert_created()
        .json::<Product>()
        .id;
    assert!(second > first);
}

#[tokio::test]
async fn test_list_paging() {
    let app = common::app().await;

    for i in 0..105 {
        app.post_json("/products", &item(&format!("item-{i}"), 1.0, i))
            .await
            .assert_created();
    }

    app.get("/products")
        .await
        .assert_ok()
        .assert_len("", 100)
        .assert_at("/0/id", 1)
        .assert_at("/99/id", 100);

    app.get("/products?skip=100")
        .await
        .assert_ok()
        .assert_len("", 5)
        .assert_at("/0/name", "item-100");

    app.get("/products?skip=10&limit=2")
        .await
        .assert_ok()
        .assert_len("", 2)
        .assert_at("/0/id", 11)
        .assert_at("/1/id", 12);

    app.get("/products?limit=0").await.assert_ok().assert_len("", 0);
    app.get("/products?skip=500").await.assert_ok().assert_len("", 0);
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let app = common::app().await;

    app.get("/products?skip=-1").await.assert_field_error("skip");
    app.get("/products?limit=-5").await.assert_field_error("limit");
    app.get("/products?limit=many").await.assert_field_error("query");
}

#[tokio::test]
async fn test_update_partial_semantics() {
    let app = common::app().await;
    let chair = ProductCreate {
        description: Some("Oak".into()),
        ..item("Chair", 120.0, 4)
    };
    app.post_json("/products", &chair).await.assert_created();

    app.put_json("/products/1", &json!({}))
        .await
        .assert_ok()
        .assert_at("/name", "Chair")
        .assert_at("/description", "Oak")
        .assert_at("/price", 120.0)
        .assert_at("/quantity", 4);

    app.put_json("/products/1", &json!({ "name": "Armchair", "price": 150.0 }))
        .await
        .assert_ok()
        .assert_at("/name", "Armchair")
        .assert_at("/price", 150.0)
        .assert_at("/description", "Oak");

    app.put_json("/products/1", &json!({ "description": null }))
        .await
        .assert_ok()
        .assert_at("/description", Value::Null)
        .assert_at("/name", "Armchair");

    app.get("/products/1")
        .await
        .assert_ok()
        .assert_at("/description", Value::Null)
        .assert_at("/id", 1);
}

#[tokio::test]
async fn test_update_rejects_invalid_values() {
    let app = common::app().await;
    app.post_json("/products", &smartphone()).await.assert_created();

    app.put_json("/products/1", &json!({ "price": -1 }))
        .await
        .assert_field_error("price");
    app.put_json("/products/1", &json!({ "quantity": -2 }))
        .await
        .assert_field_error("quantity");
    app.put_json("/products/1", &json!({ "description": "d".repeat(301) }))
        .await
        .assert_field_error("description");

    app.get("/products/1")
        .await
        .assert_ok()
        .assert_at("/price", 2999.99)
        .assert_at("/quantity", 50);
}

#[tokio::test]
async fn test_missing_products() {
    let app = common::app().await;

    app.get("/products/42").await.assert_not_found();
    app.put_json("/products/42", &json!({ "quantity": 1 }))
        .await
        .assert_not_found()
        .assert_error("Product not found");
    app.put_json("/products/42", &json!({}))
        .await
        .assert_not_found();
    app.delete("/products/42").await.assert_not_found();
}

#[tokio::test]
async fn test_non_integer_id_is_rejected() {
    let app = common::app().await;

    app.get("/products/abc").await.assert_field_error("path");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_updates_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::file_app(&dir.path().join("stock.db"), 8).await;
    app.post_json("/products", &smartphone()).await.assert_created();

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                app.put_json("/products/1", &json!({ "quantity": i })).await.status
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::OK);
    }

    let quantity = app.get("/products/1").await.assert_ok().json::<Product>().quantity;
    assert!((0..40).contains(&quantity));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_deletes_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::file_app(&dir.path().join("stock.db"), 8).await;
    app.post_json("/products", &smartphone()).await.assert_created();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { app.delete("/products/1").await.status })
        })
        .collect();
    let mut statuses = Vec::new();
    for task in tasks {
        statuses.push(task.await.unwrap());
    }

    let deleted = statuses.iter().filter(|s| **s == StatusCode::NO_CONTENT).count();
    let missing = statuses.iter().filter(|s| **s == StatusCode::NOT_FOUND).count();
    assert_eq!((deleted, missing), (1, 15));
}

#[tokio::test]
async fn test_root_metadata() {
    let app = common::app().await;

    app.get("/")
        .await
        .assert_ok()
        .assert_at("/project", "Product Inventory API")
        .assert_at("/version", env!("CARGO_PKG_VERSION"))
        .assert_at("/docs_url", "/docs")
        .assert_at("/redoc_url", "/redoc");
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _state) = common::app_with("app:\n  api:\n    prefix: /api/v1\n").await;

    let resp = app.get("/openapi.json").await.assert_ok();
    assert_eq!(resp.header("content-type"), Some("application/json"));
    let spec: Value = resp.json();

    assert_eq!(spec["info"]["title"], "Product Inventory API");
    let paths = spec["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/products"));
    assert!(paths.contains_key("/api/v1/products/{id}"));
    for method in ["get", "put", "delete"] {
        assert!(spec["paths"]["/api/v1/products/{id}"][method].is_object());
    }
    assert_eq!(
        spec["paths"]["/api/v1/products"]["post"]["responses"]["201"]["content"]
            ["application/json"]["schema"]["$ref"],
        "#/components/schemas/Product"
    );

    let schemas = &spec["components"]["schemas"];
    for name in ["Product", "ProductCreate", "ProductUpdate", "ValidationError"] {
        assert!(schemas[name].is_object(), "missing schema {name}");
    }
    assert!(schemas["ProductCreate"]["properties"]["price"].is_object());
}

#[tokio::test]
async fn test_docs_pages() {
    let app = common::app().await;

    let docs = app.get("/docs").await.assert_ok();
    assert!(docs.text().contains("SwaggerUIBundle"));
    let redoc = app.get("/redoc").await.assert_ok();
    assert!(redoc.text().contains("spec-url=\"/openapi.json\""));
}

#[tokio::test]
async fn test_docs_disabled() {
    let (app, _state) = common::app_with("app:\n  docs:\n    enabled: false\n").await;

    app.get("/")
        .await
        .assert_ok()
        .assert_at("/docs_url", Value::Null)
        .assert_at("/redoc_url", Value::Null);
    app.get("/docs").await.assert_not_found();
    app.get("/redoc").await.assert_not_found();
    app.get("/openapi.json").await.assert_ok();
}

#[tokio::test]
async fn test_health_reports_database() {
    let (app, state) = common::app_with("").await;

    app.get("/health")
        .await
        .assert_ok()
        .assert_at("/status", "UP")
        .assert_at("/checks/0/name", "database");

    state.pool.close().await;

    app.get("/health")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE)
        .assert_at("/status", "DOWN");
}

#[tokio::test]
async fn test_api_prefix() {
    let (app, _state) = common::app_with("app:\n  api:\n    prefix: /api/v1\n").await;

    app.post_json("/api/v1/products", &smartphone())
        .await
        .assert_created();
    app.get("/api/v1/products/1").await.assert_ok();
    app.get("/products/1").await.assert_not_found();
    app.get("/").await.assert_ok();
}
