//! JWT claim structure for session tokens.

use gradebook_models::{Role, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in every session token.
///
/// Identity and role travel inside the token, so authorization never needs
/// a store lookup. A role change would only take effect on the next login,
/// but roles are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: UserId,
    pub role: Role,
    /// Expiration, Unix seconds
    pub exp: usize,
    /// Issued-at, Unix seconds
    pub iat: usize,
}

impl Claims {
    /// The expiry saturates at `usize::MAX` rather than wrapping.
    pub fn new(user_id: UserId, role: Role, issued_at: usize, lifetime_seconds: usize) -> Self {
        Self {
            sub: user_id,
            role,
            exp: issued_at.saturating_add(lifetime_seconds),
            iat: issued_at,
        }
    }

    pub fn is_expired_at(&self, now: usize) -> bool {
        self.exp <= now
    }
}
