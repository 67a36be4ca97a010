use std::future::Future;

use sqlx::SqliteConnection;

use crate::entity::Entity;
use crate::error::DataResult;
use crate::page::PageRequest;

/// Async CRUD repository over a caller-supplied connection.
///
/// The connection is the request's scope (usually a [`Tx`](crate::Tx)), so
/// every operation of one request shares one transaction. Absence is reported
/// in the `Ok` channel (`None` / `false`); `Err` means the store failed.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait Repository<T: Entity>: Send + Sync {
    /// Validated creation input.
    type Create: Send + Sync;
    /// Validated partial-update input.
    type Update: Send + Sync;

    fn get(
        &self,
        conn: &mut SqliteConnection,
        id: T::Id,
    ) -> impl Future<Output = DataResult<Option<T>>> + Send;

    fn list(
        &self,
        conn: &mut SqliteConnection,
        page: PageRequest,
    ) -> impl Future<Output = DataResult<Vec<T>>> + Send;

    fn create(
        &self,
        conn: &mut SqliteConnection,
        input: &Self::Create,
    ) -> impl Future<Output = DataResult<T>> + Send;

    fn update(
        &self,
        conn: &mut SqliteConnection,
        id: T::Id,
        input: &Self::Update,
    ) -> impl Future<Output = DataResult<Option<T>>> + Send;

    fn delete(
        &self,
        conn: &mut SqliteConnection,
        id: T::Id,
    ) -> impl Future<Output = DataResult<bool>> + Send;

    fn count(&self, conn: &mut SqliteConnection) -> impl Future<Output = DataResult<u64>> + Send;
}
