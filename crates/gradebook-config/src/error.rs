use thiserror::Error;

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),
    #[error("{key} has an invalid value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
