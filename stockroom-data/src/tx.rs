//! Transaction wrapper with automatic lifecycle management.

use std::ops::{Deref, DerefMut};

use sqlx::{Database, Pool, Transaction};
use stockroom_core::{HttpError, ManagedResource};

use crate::error::SqlxErrorExt;

/// Trait for application states that contain a database pool.
///
/// ```ignore
/// impl HasPool<Sqlite> for AppState {
///     fn pool(&self) -> &Pool<Sqlite> {
///         &self.pool
///     }
/// }
/// ```
pub trait HasPool<DB: Database> {
    fn pool(&self) -> &Pool<DB>;
}

/// A request-scoped SQLx [`Transaction`].
///
/// - Acquired (begun) at the start of the handler
/// - Committed by `release(true)`
/// - Rolled back when dropped without a successful release, which covers
///   every early `?` return
pub struct Tx<'a, DB: Database>(pub Transaction<'a, DB>);

impl<'a, DB: Database> Deref for Tx<'a, DB> {
    type Target = Transaction<'a, DB>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, DB: Database> DerefMut for Tx<'a, DB> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a, DB: Database> Tx<'a, DB> {
    /// Unwraps the `Tx` into the inner `Transaction`.
    pub fn into_inner(self) -> Transaction<'a, DB> {
        self.0
    }

    /// Returns a mutable reference to the underlying connection.
    pub fn conn(&mut self) -> &mut <DB as Database>::Connection {
        &mut *self.0
    }
}

impl<S, DB> ManagedResource<S> for Tx<'static, DB>
where
    DB: Database,
    S: HasPool<DB> + Send + Sync,
{
    type Error = HttpError;

    async fn acquire(state: &S) -> Result<Self, Self::Error> {
        let tx = state
            .pool()
            .begin()
            .await
            .map_err(|e| HttpError::from(e.into_data_error()))?;
        Ok(Tx(tx))
    }

    async fn release(self, success: bool) -> Result<(), Self::Error> {
        if success {
            self.into_inner()
                .commit()
                .await
                .map_err(|e| HttpError::from(e.into_data_error()))?;
        }
        // If !success, the transaction is dropped and automatically rolled back
        Ok(())
    }
}
