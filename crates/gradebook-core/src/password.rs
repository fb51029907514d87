//! Password hashing and verification with bcrypt.

use std::sync::OnceLock;

use bcrypt::{hash, verify};

use crate::errors::AppError;

/// Work factor used when no explicit cost is configured.
pub const DEFAULT_PASSWORD_COST: u32 = 10;

const DUMMY_PASSWORD: &str = "gradebook-unmatched-credential";

// One slot per bcrypt cost (valid costs are 4..=31).
static DUMMY_HASHES: [OnceLock<String>; 32] = [const { OnceLock::new() }; 32];

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_PASSWORD_COST)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Checks `password` against a stored bcrypt hash.
///
/// A malformed hash is treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

/// A bcrypt hash at `cost` that no caller-supplied password is expected to
/// match. Computed once per cost and reused.
///
/// Login verifies against it when no account exists, so an unknown email
/// pays the same bcrypt price as a wrong password.
pub fn dummy_hash(cost: u32) -> Result<&'static str, AppError> {
    let slot = DUMMY_HASHES.get(cost as usize).ok_or_else(|| {
        AppError::internal(anyhow::anyhow!("Unsupported bcrypt cost: {}", cost))
    })?;
    if let Some(hashed) = slot.get() {
        return Ok(hashed);
    }
    let hashed = hash_password_with_cost(DUMMY_PASSWORD, cost)?;
    Ok(slot.get_or_init(|| hashed))
}
