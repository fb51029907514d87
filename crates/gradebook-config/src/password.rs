//! Credential hashing configuration.
//!
//! - `BCRYPT_COST` (optional): bcrypt work factor, default 10, clamped to 4..=31

use crate::{env_lookup, parse_or};

pub const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl PasswordConfig {
    pub fn with_cost(cost: u32) -> Self {
        Self {
            bcrypt_cost: cost.clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::with_cost(parse_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordConfig::from_lookup(|_| None).bcrypt_cost, 10);
    }

    #[test]
    fn test_cost_is_clamped() {
        assert_eq!(PasswordConfig::with_cost(1).bcrypt_cost, 4);
        assert_eq!(PasswordConfig::with_cost(40).bcrypt_cost, 31);
        assert_eq!(PasswordConfig::with_cost(12).bcrypt_cost, 12);
    }

    #[test]
    fn test_unparsable_cost_falls_back() {
        let config = PasswordConfig::from_lookup(|_| Some("fast".to_string()));
        assert_eq!(config.bcrypt_cost, DEFAULT_BCRYPT_COST);
    }
}
