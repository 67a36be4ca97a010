//! Health check endpoints.
//!
//! | Path               | Description                                |
//! |--------------------|--------------------------------------------|
//! | `GET /health`      | Aggregated status, 200 if UP, 503 if DOWN  |
//! | `GET /health/live` | Liveness probe, always 200                 |
//!
//! ```ignore
//! struct DbHealth { pool: SqlitePool }
//!
//! impl HealthIndicator for DbHealth {
//!     fn name(&self) -> &str { "database" }
//!     async fn check(&self) -> HealthStatus {
//!         match sqlx::query("SELECT 1").execute(&self.pool).await {
//!             Ok(_) => HealthStatus::Up,
//!             Err(e) => HealthStatus::Down(e.to_string()),
//!         }
//!     }
//! }
//!
//! let router = HealthRegistry::new().check(DbHealth { pool }).router();
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

/// A named health indicator that can be registered with [`HealthRegistry`].
pub trait HealthIndicator: Send + Sync + 'static {
    /// The name of this health check (e.g. `"database"`).
    fn name(&self) -> &str;

    /// Perform the health check.
    fn check(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthCheckStatus {
    Up,
    Down,
}

/// A single check result in the health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

/// Aggregated health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthCheckStatus,
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// Object-safe wrapper for HealthIndicator.
trait HealthIndicatorErased: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>>;
}

impl<T: HealthIndicator> HealthIndicatorErased for T {
    fn name(&self) -> &str {
        HealthIndicator::name(self)
    }

    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>> {
        Box::pin(HealthIndicator::check(self))
    }
}

/// The set of registered checks plus the process start time.
pub struct HealthRegistry {
    checks: Vec<Box<dyn HealthIndicatorErased>>,
    start_time: Instant,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self {
            checks: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Register a health check.
    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Box::new(indicator));
        self
    }

    /// Run every check in registration order.
    pub async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        let mut all_up = true;

        for indicator in &self.checks {
            let start = Instant::now();
            let status = indicator.check().await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (check_status, reason) = match status {
                HealthStatus::Up => (HealthCheckStatus::Up, None),
                HealthStatus::Down(r) => {
                    all_up = false;
                    tracing::warn!(check = indicator.name(), reason = %r, "health check failed");
                    (HealthCheckStatus::Down, Some(r))
                }
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status: check_status,
                reason,
                duration_ms,
            });
        }

        HealthResponse {
            status: if all_up {
                HealthCheckStatus::Up
            } else {
                HealthCheckStatus::Down
            },
            checks,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Routes serving `/health` and `/health/live`.
    pub fn router(self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(live_handler))
            .with_state(Arc::new(self))
    }
}

impl Default for HealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

async fn health_handler(State(registry): State<Arc<HealthRegistry>>) -> Response {
    let response = registry.aggregate().await;
    let status = match response.status {
        HealthCheckStatus::Up => StatusCode::OK,
        HealthCheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response)).into_response()
}

async fn live_handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "UP" }))).into_response()
}
