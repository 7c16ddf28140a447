//! Service configuration
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. an optional `config/api` file (any format the `config` crate reads)
//! 3. `APP_*` environment variables, `__` separating nested keys
//!    (e.g. `APP_SERVER__PORT=8080`, `APP_STORE__BACKEND=memory`)
//! 4. `DATABASE_URL`, for compatibility with the usual tooling

use common::database::DatabaseConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which repository implementation backs the handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
}

/// Complete service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl Settings {
    /// Load settings from the default file location and the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config/api")
    }

    /// Load settings, reading the optional file at `path` (extension inferred)
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("store.backend", "postgres")?
            .set_default("log.level", "info")?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }
}
