//! Runtime settings for the service.

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_SCHEMA: &str = "inventory";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Which [`crate::store::ItemStore`] implementation to build at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

/// PostgreSQL connection settings. Present only for the postgres backend.
#[derive(Clone, Debug, PartialEq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    /// Schema holding the items table.
    pub schema: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub backend: StoreBackend,
    pub database: Option<DatabaseSettings>,
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
}
