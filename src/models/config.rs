use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::db::DEFAULT_POOL_SIZE;

/// Configuration options for the CMS server.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_address")]
    pub address: String,
    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path (or URL) of the SQLite database.
    pub database_url: String,
    /// Maximum number of pooled database connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_pool_max_size() -> u32 {
    DEFAULT_POOL_SIZE
}

impl ServerConfig {
    /// Load settings from `<path>.yaml` (optional), then `APP_*` variables,
    /// then `DATABASE_URL`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .set_override_option("database_url", std::env::var("DATABASE_URL").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.address.clone(), self.port)
    }
}
