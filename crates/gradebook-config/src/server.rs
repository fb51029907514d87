//! HTTP server configuration.
//!
//! - `HOST` (optional): bind address, default `0.0.0.0`
//! - `PORT` (optional): listen port, default `8080`
//! - `RUN_MIGRATIONS` (optional): apply migrations at boot, default `true`

use crate::{env_lookup, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("HOST")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            run_migrations: lookup("RUN_MIGRATIONS")
                .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
