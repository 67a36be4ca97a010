use super::{ConfigError, StockroomConfig};

/// Trait for strongly-typed configuration sections.
///
/// ```ignore
/// #[derive(Clone, Debug)]
/// pub struct DatabaseSettings {
///     pub url: String,
///     pub max_connections: u32,
/// }
///
/// impl ConfigProperties for DatabaseSettings {
///     fn prefix() -> &'static str { "database" }
///
///     fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError> {
///         Ok(Self {
///             url: config.get("database.url")?,
///             max_connections: config.get_or("database.max-connections", 5),
///         })
///     }
/// }
/// ```
pub trait ConfigProperties: Sized {
    /// The configuration key prefix (e.g., `"database"`).
    fn prefix() -> &'static str;

    /// Construct from a `StockroomConfig` instance.
    fn from_config(config: &StockroomConfig) -> Result<Self, ConfigError>;
}
