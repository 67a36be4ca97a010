use stockroom_core::{ConfigError, ConfigProperties, LogFormat, StockroomConfig};

/// `app.*` keys.
#[derive(Clone, Debug)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    /// Normalised route prefix: empty, or `/segment[/segment..]` without a trailing slash.
    pub api_prefix: String,
    pub log_format: LogFormat,
    /// Serve Swagger UI at `/docs` and ReDoc at `/redoc`.
    pub docs_enabled: bool,
}

/// `server.*` keys.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub addr: String,
    pub request_timeout_secs: Option<u64>,
}

/// `database.*` keys.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

/// Everything the service reads from configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

pub const DEFAULT_NAME: &str = "Product Inventory API";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./data/database.db";

impl ConfigProperties for AppSettings {
    fn prefix() -> &'static str {
        "app"
    }

    fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError> {
        let log_format: String = config.get_or("app.log.format", "pretty".to_string())?;
        let log_format = log_format.parse().map_err(|message| ConfigError::Invalid {
            key: "app.log.format".into(),
            message,
        })?;
        let api_prefix: String = config.get_or("app.api.prefix", String::new())?;

        Ok(Self {
            name: config.get_or("app.name", DEFAULT_NAME.to_string())?,
            version: config.get_or("app.version", env!("CARGO_PKG_VERSION").to_string())?,
            api_prefix: normalize_prefix(&api_prefix),
            log_format,
            docs_enabled: config.get_or("app.docs.enabled", true)?,
        })
    }
}

impl ConfigProperties for ServerSettings {
    fn prefix() -> &'static str {
        "server"
    }

    fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError> {
        let request_timeout_secs: Option<u64> = config.get_or("server.request-timeout-secs", None)?;
        if request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                key: "server.request-timeout-secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        Ok(Self {
            addr: config.get_or("server.addr", DEFAULT_ADDR.to_string())?,
            request_timeout_secs,
        })
    }
}

impl ConfigProperties for DatabaseSettings {
    fn prefix() -> &'static str {
        "database"
    }

    fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            url: config.get_or("database.url", DEFAULT_DATABASE_URL.to_string())?,
            max_connections: config.get_or("database.max-connections", 5)?,
        })
    }
}

impl ConfigProperties for Settings {
    /// Root section; the nested sections carry their own prefixes.
    fn prefix() -> &'static str {
        ""
    }

    fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            app: AppSettings::from_config(config)?,
            server: ServerSettings::from_config(config)?,
            database: DatabaseSettings::from_config(config)?,
        })
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
