//! # Gradebook Config
//!
//! Configuration structures loaded once at startup from environment variables:
//!
//! - [`jwt`]: session token signing secret and lifetime
//! - [`password`]: bcrypt work factor
//! - [`database`]: connection string and pool size
//! - [`server`]: listen address and boot behaviour
//! - [`cors`]: allowed browser origins
//!
//! Every config exposes `from_env()` and a `from_lookup()` variant that takes
//! an arbitrary key lookup, so parsing can be exercised without touching the
//! process environment.
//!
//! # Example
//!
//! ```ignore
//! use gradebook_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?; // fails if JWT_SECRET is unset
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Reads `key` through `lookup` and parses it, falling back to `default` when
/// the variable is missing or unparsable.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
