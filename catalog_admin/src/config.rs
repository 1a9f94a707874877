// config.rs - Environment configuration for the server and DB tools
//
// Values come from the process environment, optionally preloaded from a
// `.env` file.

use std::env;
use thiserror::Error;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SCHEMA: &str = "catalog";
pub const DEFAULT_SEED_FILE: &str = "data/products.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// DATABASE_URL
    pub database_url: String,
    /// DB_MAX_CONNECTIONS
    pub max_connections: u32,
    /// CATALOG_SCHEMA
    pub schema: String,
    /// CATALOG_SEED_FILE
    pub seed_file: String,
}

impl AppConfig {
    /// Load `.env` (if any) and read the configuration
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DB_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let schema = lookup("CATALOG_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
        if schema.is_empty() || !schema.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Invalid {
                name: "CATALOG_SCHEMA",
                value: schema,
            });
        }

        let seed_file = lookup("CATALOG_SEED_FILE").unwrap_or_else(|| DEFAULT_SEED_FILE.to_string());

        Ok(AppConfig {
            database_url,
            max_connections,
            schema,
            seed_file,
        })
    }
}
