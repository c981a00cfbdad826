use super::env_source::{self, EnvSource};
use super::errors::ConfigError;
use serde::Serialize;

/// Database connection and pool tuning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub echo: bool,
    pub pool_size: u32,
    pub max_overflow: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite:///data/trading_data.db".to_string(),
            echo: false,
            pool_size: 5,
            max_overflow: 10,
        }
    }
}

impl DatabaseSettings {
    pub fn from_source(source: &impl EnvSource) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: env_source::string(source, "DATABASE_URL", &defaults.url),
            echo: env_source::boolean(source, "DB_ECHO", &defaults.echo.to_string()),
            pool_size: env_source::integer(source, "DB_POOL_SIZE", defaults.pool_size)?,
            max_overflow: env_source::integer(source, "DB_MAX_OVERFLOW", defaults.max_overflow)?,
        })
    }
}
