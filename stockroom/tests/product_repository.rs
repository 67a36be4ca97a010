mod common;

use stockroom::models::{ProductCreate, ProductUpdate};
use stockroom::repository::{ProductRepository, SCHEMA};
use stockroom_data::pool::{connect, ensure_schema};
use stockroom_data::{PageRequest, Repository};

fn input(name: &str, price: f64, quantity: i64) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        description: None,
        price,
        quantity,
    }
}

#[tokio::test]
async fn test_create_then_get() {
    let state = common::state(&common::settings("")).await;
    let repo = &state.products;
    let mut conn = state.pool.acquire().await.unwrap();

    let created = repo.create(&mut conn, &input("Mouse", 19.9, 10)).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.description, None);

    let fetched = repo.get(&mut conn, created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
    assert_eq!(repo.get(&mut conn, 99).await.unwrap(), None);
}

#[tokio::test]
async fn test_list_orders_by_id_and_windows() {
    let state = common::state(&common::settings("")).await;
    let repo = &state.products;
    let mut conn = state.pool.acquire().await.unwrap();

    for i in 0..5 {
        repo.create(&mut conn, &input(&format!("p{i}"), 1.0, i)).await.unwrap();
    }
    assert_eq!(repo.count(&mut conn).await.unwrap(), 5);

    let all = repo.list(&mut conn, PageRequest::default()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let window = repo.list(&mut conn, PageRequest::new(1, 2)).await.unwrap();
    let ids: Vec<i64> = window.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 3]);

    assert!(repo.list(&mut conn, PageRequest::new(5, 10)).await.unwrap().is_empty());
    assert!(repo.list(&mut conn, PageRequest::new(0, 0)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_merges_present_fields() {
    let state = common::state(&common::settings("")).await;
    let repo = &state.products;
    let mut conn = state.pool.acquire().await.unwrap();

    let mut desk = input("Desk", 200.0, 2);
    desk.description = Some("Walnut".into());
    let created = repo.create(&mut conn, &desk).await.unwrap();

    let patch = ProductUpdate {
        price: Some(180.0),
        ..Default::default()
    };
    let updated = repo.update(&mut conn, created.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.price, 180.0);
    assert_eq!(updated.name, "Desk");
    assert_eq!(updated.description.as_deref(), Some("Walnut"));
    assert_eq!(updated.quantity, 2);

    let clear = ProductUpdate {
        description: Some(None),
        ..Default::default()
    };
    repo.update(&mut conn, created.id, &clear).await.unwrap();
    let stored = repo.get(&mut conn, created.id).await.unwrap().unwrap();
    assert_eq!(stored.description, None);
    assert_eq!(stored.price, 180.0);

    assert_eq!(repo.update(&mut conn, 77, &patch).await.unwrap(), None);

    let unchanged = repo
        .update(&mut conn, created.id, &ProductUpdate::default())
        .await
        .unwrap();
    assert_eq!(unchanged, Some(stored));
    assert_eq!(
        repo.update(&mut conn, 77, &ProductUpdate::default()).await.unwrap(),
        None
    );

    let free = ProductUpdate {
        price: Some(0.0),
        ..Default::default()
    };
    assert!(repo.update(&mut conn, created.id, &free).await.is_err());
}

#[tokio::test]
async fn test_delete_reports_presence() {
    let state = common::state(&common::settings("")).await;
    let repo = &state.products;
    let mut conn = state.pool.acquire().await.unwrap();

    let created = repo.create(&mut conn, &input("Cup", 3.0, 12)).await.unwrap();
    assert!(repo.delete(&mut conn, created.id).await.unwrap());
    assert!(!repo.delete(&mut conn, created.id).await.unwrap());
    assert_eq!(repo.get(&mut conn, created.id).await.unwrap(), None);
    assert_eq!(repo.count(&mut conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_store_rejects_non_positive_price() {
    let state = common::state(&common::settings("")).await;
    let repo = &state.products;
    let mut conn = state.pool.acquire().await.unwrap();

    assert!(repo.create(&mut conn, &input("Free", 0.0, 1)).await.is_err());
    assert!(repo.create(&mut conn, &input("Debt", 1.0, -1)).await.is_err());
    assert_eq!(repo.count(&mut conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("data/database.db").display());
    let repo = ProductRepository::new().unwrap();

    let pool = connect(&url, 2).await.unwrap();
    ensure_schema(&pool, SCHEMA).await.unwrap();
    {
        let mut conn = pool.acquire().await.unwrap();
        repo.create(&mut conn, &input("Kettle", 35.0, 6)).await.unwrap();
    }
    pool.close().await;

    let pool = connect(&url, 2).await.unwrap();
    ensure_schema(&pool, SCHEMA).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();
    let kettle = repo.get(&mut conn, 1).await.unwrap().unwrap();
    assert_eq!(kettle.name, "Kettle");
    assert_eq!(kettle.quantity, 6);
}
