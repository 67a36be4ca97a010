use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use stockroom_core::{HealthIndicator, HealthStatus};

use crate::error::{DataError, DataResult, SqlxErrorExt};

/// Whether a SQLite location string names an in-memory database.
pub fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Lock wait before a writer gives up with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite pool for the given location string.
///
/// File-backed databases are created, together with their parent directory,
/// when missing, and run in WAL mode so readers never block the writer. An in-memory database lives inside a single connection, so
/// the pool is pinned to exactly one connection that is never recycled;
/// otherwise each pooled connection would see its own empty database.
pub async fn connect(url: &str, max_connections: u32) -> DataResult<SqlitePool> {
    let mut options = SqliteConnectOptions::from_str(url)
        .map_err(SqlxErrorExt::into_data_error)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        if let Some(parent) = options.get_filename().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(DataError::database)?;
            }
        }
        options = options.journal_mode(SqliteJournalMode::Wal);
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    tracing::info!(url, "Connected to database");
    Ok(pool)
}

/// Execute idempotent DDL statements (`CREATE TABLE IF NOT EXISTS ...`) in order.
pub async fn ensure_schema(pool: &SqlitePool, statements: &[&str]) -> DataResult<()> {
    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
    }
    tracing::debug!(statements = statements.len(), "Schema ensured");
    Ok(())
}

/// Health indicator running `SELECT 1` against the pool.
#[derive(Clone)]
pub struct PoolHealth {
    pool: SqlitePool,
}

impl PoolHealth {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl HealthIndicator for PoolHealth {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_locations() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:stock?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://./data/database.db"));
    }
}
