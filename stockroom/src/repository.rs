use std::sync::Arc;

use sqlx::SqliteConnection;
use stockroom_data::{
    DataResult, Entity, EntityStatements, PageRequest, QueryBuilder, QueryError, Repository,
    SqlxErrorExt,
};

use crate::models::{Product, ProductCreate, ProductField, ProductUpdate};

/// DDL for the product store, executed at startup. Idempotent.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        price REAL NOT NULL CHECK (price > 0),
        quantity INTEGER NOT NULL CHECK (quantity >= 0)
    )",
    "CREATE INDEX IF NOT EXISTS ix_products_name ON products (name)",
];

/// SQLite-backed product repository.
///
/// Ids come from `AUTOINCREMENT`, so they are never reused after a delete.
#[derive(Clone)]
pub struct ProductRepository {
    statements: Arc<EntityStatements>,
}

impl ProductRepository {
    pub fn new() -> Result<Self, QueryError> {
        Ok(Self {
            statements: Arc::new(EntityStatements::for_entity::<Product>()?),
        })
    }
}

impl Repository<Product> for ProductRepository {
    type Create = ProductCreate;
    type Update = ProductUpdate;

    async fn get(&self, conn: &mut SqliteConnection, id: i64) -> DataResult<Option<Product>> {
        sqlx::query_as::<_, Product>(&self.statements.select_by_id)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn list(&self, conn: &mut SqliteConnection, page: PageRequest) -> DataResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(&self.statements.select_page)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn create(&self, conn: &mut SqliteConnection, input: &ProductCreate) -> DataResult<Product> {
        sqlx::query_as::<_, Product>(&self.statements.insert)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(input.quantity)
            .fetch_one(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// One `UPDATE .. RETURNING` setting only the present columns, so the
    /// write lock is taken by the first statement of the request.
    async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        input: &ProductUpdate,
    ) -> DataResult<Option<Product>> {
        let changes = input.changes();
        if changes.is_empty() {
            return self.get(conn, id).await;
        }
        let columns: Vec<&str> = changes.iter().map(ProductField::column).collect();
        let sql = QueryBuilder::new(Product::table_name())
            .where_eq(Product::id_column())
            .returning(Product::columns())
            .build_update(&columns)?;

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for change in changes {
            query = match change {
                ProductField::Name(name) => query.bind(name),
                ProductField::Description(description) => query.bind(description),
                ProductField::Price(price) => query.bind(price),
                ProductField::Quantity(quantity) => query.bind(quantity),
            };
        }
        query
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> DataResult<bool> {
        let result = sqlx::query(&self.statements.delete)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, conn: &mut SqliteConnection) -> DataResult<u64> {
        let (count,): (i64,) = sqlx::query_as(&self.statements.count)
            .fetch_one(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(count.max(0) as u64)
    }
}
