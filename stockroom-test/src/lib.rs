//! In-process HTTP client for Stockroom integration tests.
//!
//! Requests are dispatched with `tower::ServiceExt::oneshot`, so no port is
//! bound. Response helpers understand the service's error bodies: the
//! `{"error": ..}` shape and the 422 `{"error": "Validation failed",
//! "details": [{"field", "message", "code"}]}` shape.

mod app;

pub use app::{TestApp, TestResponse};
