//! Request-scoped resources with an acquire/release lifecycle.
//!
//! A handler acquires the resource when it starts and releases it on the way
//! out:
//!
//! - `release(true)` after the handler body succeeded (commit, flush, ...)
//! - no call at all on an error path: the value is dropped, and its `Drop`
//!   performs the cleanup (rollback, return to pool, ...)
//!
//! ```ignore
//! async fn create(State(state): State<AppState>) -> Result<Json<Product>, HttpError> {
//!     let mut tx = Tx::acquire(&state).await?;
//!     let product = repo.create(&mut tx, input).await?; // `?` drops tx -> rollback
//!     tx.release(true).await?;
//!     Ok(Json(product))
//! }
//! ```

use std::future::Future;

use axum::response::Response;

/// A resource with managed lifecycle (acquire/release).
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ManagedResource<{S}>`",
    note = "implement `ManagedResource<S>` with `acquire()` and `release()` methods for your type"
)]
pub trait ManagedResource<S>: Sized {
    /// Error type returned by acquire/release operations.
    /// Must be convertible to an HTTP response.
    type Error: Into<Response>;

    /// Acquires the resource from the application state.
    fn acquire(state: &S) -> impl Future<Output = Result<Self, Self::Error>> + Send;

    /// Releases the resource after the handler completes.
    ///
    /// - `success: true`: finalize (e.g. commit)
    /// - `success: false`: discard (e.g. rollback)
    fn release(self, success: bool) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
