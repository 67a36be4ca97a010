use std::fs;

use stockroom_core::config::{ConfigError, StockroomConfig};

#[test]
fn profile_file_overrides_base_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("application.yaml"),
        "app:\n  name: Base\n  log:\n    format: pretty\nserver:\n  addr: 0.0.0.0:8000\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("application-staging.yaml"),
        "server:\n  addr: 127.0.0.1:9100\n",
    )
    .unwrap();

    let config = StockroomConfig::load_from(dir.path(), "staging").unwrap();
    if std::env::var(stockroom_core::config::PROFILE_ENV).is_err() {
        assert_eq!(config.profile(), "staging");
        assert_eq!(config.get::<String>("server.addr").unwrap(), "127.0.0.1:9100");
    }
    assert_eq!(config.get::<String>("app.name").unwrap(), "Base");
    assert_eq!(config.get::<String>("app.log.format").unwrap(), "pretty");
}

#[test]
fn missing_files_give_an_empty_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = StockroomConfig::load_from(dir.path(), "dev").unwrap();
    assert!(matches!(
        config.get::<String>("stockroom.test.never.set"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn broken_yaml_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("application.yaml"), "server: [addr\n").unwrap();
    let err = StockroomConfig::load_from(dir.path(), "dev").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}
