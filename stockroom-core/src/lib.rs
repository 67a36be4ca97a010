//! # stockroom-core
//!
//! Shared HTTP plumbing for the Stockroom service: the transport error type,
//! validating extractors, layered configuration, tracing setup, request-scoped
//! resources, health checks and the server runner.

pub mod config;
pub mod error;
pub mod extract;
pub mod health;
pub mod layers;
pub mod managed;
pub mod server;
pub mod validation;

pub use config::{ConfigError, ConfigProperties, ConfigValue, FromConfigValue, StockroomConfig};
pub use error::{error_response, HttpError};
pub use extract::{PathParam, ValidJson, ValidQuery};
pub use health::{HealthIndicator, HealthRegistry, HealthStatus};
pub use layers::{catch_panic_layer, default_trace, init_tracing, request_timeout, LogFormat};
pub use managed::ManagedResource;
pub use server::serve;
pub use validation::{FieldError, ValidationErrorResponse};
