//! Load [`Settings`] from the process environment or any key lookup.

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;

impl Settings {
    /// Read settings from environment variables. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary lookup. Empty values count as unset.
    ///
    /// Keys: `STORE_BACKEND`, `DATABASE_URL`, `DB_MAX_CONNECTIONS`,
    /// `INVENTORY_SCHEMA`, `BIND_ADDR`, `BODY_LIMIT_BYTES`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL");
        let backend = match get("STORE_BACKEND") {
            Some(raw) => StoreBackend::from_str(&raw)?,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };

        let database = match backend {
            StoreBackend::Memory => None,
            StoreBackend::Postgres => {
                let url = database_url.ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections = parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?;
                let schema = get("INVENTORY_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.to_string());
                Some(DatabaseSettings {
                    url,
                    max_connections,
                    schema,
                })
            }
        };

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;
        let body_limit_bytes = parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES)?;

        Ok(Settings {
            backend,
            database,
            bind_addr,
            body_limit_bytes,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
