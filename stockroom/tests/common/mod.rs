#![allow(dead_code)]

use stockroom::{build_router, init_state, AppState, Settings};
use stockroom_core::{ConfigProperties, StockroomConfig};
use stockroom_test::TestApp;

/// Settings for a private in-memory store, with `extra_yaml` merged on top.
pub fn settings(extra_yaml: &str) -> Settings {
    let yaml = format!("database:\n  url: \"sqlite::memory:\"\n{extra_yaml}");
    let config = StockroomConfig::from_yaml_str(&yaml, "test").expect("valid test yaml");
    Settings::from_config(&config).expect("valid test settings")
}

pub async fn state(settings: &Settings) -> AppState {
    init_state(settings).await.expect("product store")
}

pub async fn app_with(extra_yaml: &str) -> (TestApp, AppState) {
    let settings = settings(extra_yaml);
    let state = state(&settings).await;
    (TestApp::new(build_router(state.clone(), &settings)), state)
}

pub async fn app() -> TestApp {
    app_with("").await.0
}

/// A service over a SQLite file at `path`, with up to `max_connections` pooled.
pub async fn file_app(path: &std::path::Path, max_connections: u32) -> TestApp {
    let yaml = format!(
        "database:\n  url: \"sqlite://{}\"\n  max-connections: {max_connections}\n",
        path.display()
    );
    let config = StockroomConfig::from_yaml_str(&yaml, "test").expect("valid test yaml");
    let settings = Settings::from_config(&config).expect("valid test settings");
    let state = state(&settings).await;
    TestApp::new(build_router(state, &settings))
}
