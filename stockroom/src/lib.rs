//! Product inventory HTTP service.
//!
//! CRUD over a single `products` table in SQLite, served with axum.

pub mod app;
pub mod controllers;
pub mod models;
pub mod repository;
pub mod settings;
pub mod state;

pub use app::{build_router, init_state};
pub use settings::Settings;
pub use state::AppState;
