//! # stockroom-data: SQLite data layer
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Entity`] | Table/column metadata for a row type |
//! | [`Repository`] | Async CRUD operations over a request-scoped connection |
//! | [`QueryBuilder`] / [`EntityStatements`] | Checked SQL text generation |
//! | [`PageRequest`] | `skip`/`limit` window, extractable from query params |
//! | [`Tx`] | Request-scoped transaction: commit on success, rollback on drop |
//! | [`HasPool`] | Trait for application states that contain a database pool |
//! | [`SqlxErrorExt`] | `sqlx::Error` → [`DataError`] (`.into_data_error()`) |
//! | [`pool`] | Pool bootstrap, idempotent schema creation, health indicator |

pub mod entity;
pub mod error;
pub mod page;
pub mod pool;
pub mod query;
pub mod repository;
pub mod tx;

pub use entity::Entity;
pub use error::{DataError, DataResult, SqlxErrorExt};
pub use page::PageRequest;
pub use pool::PoolHealth;
pub use query::{EntityStatements, QueryBuilder, QueryError};
pub use repository::Repository;
pub use tx::{HasPool, Tx};
