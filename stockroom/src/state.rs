use std::sync::Arc;

use sqlx::{Pool, Sqlite, SqlitePool};
use stockroom_data::{HasPool, Tx};

use crate::repository::ProductRepository;
use crate::settings::AppSettings;

/// Request-scoped transaction over the service's SQLite pool.
pub type SqliteTx = Tx<'static, Sqlite>;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub products: ProductRepository,
    pub app: Arc<AppSettings>,
}

impl HasPool<Sqlite> for AppState {
    fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}
