//! Session token configuration.
//!
//! - `JWT_SECRET` (required): HMAC signing key
//! - `JWT_EXPIRY_SECONDS` (optional): token lifetime, default 24 hours

use crate::{ConfigError, env_lookup, parse_or};

pub const DEFAULT_TOKEN_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_seconds: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingVar("JWT_SECRET"))?;

        let expiry_seconds = parse_or(&lookup, "JWT_EXPIRY_SECONDS", DEFAULT_TOKEN_EXPIRY_SECONDS);
        if expiry_seconds <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "JWT_EXPIRY_SECONDS",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            expiry_seconds,
        })
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish()
    }
}
