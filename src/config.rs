//! Runtime configuration read from the environment
//!
//! Values may come from a `.env` file loaded by `dotenvy` in `main`.
//!
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Server port number (default: 8080)
//! - `DATABASE_URL` - Path to database file (default: "rentals.db")
//! - `SEED_PATH` - Seed JSON file (default: the bundled seed)
//! - `RUST_LOG` - Tracing filter (default: "rentals=debug,tower_http=debug")

use std::env;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "rentals=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "rentals.db".to_string(),
            seed_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup
    ///
    /// Unparseable or empty values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(%raw, "invalid PORT, using {}", defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            seed_path: get("SEED_PATH").map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
