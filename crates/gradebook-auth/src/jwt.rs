//! Issuing and validating session tokens.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. Validation checks the
//! signature and the `exp` claim with zero leeway; any failure collapses into
//! the same 401 so callers cannot tell a tampered token from an expired one.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use gradebook_config::JwtConfig;
use gradebook_core::AppError;
use gradebook_models::{Role, UserId};

use crate::claims::Claims;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

fn now_timestamp() -> usize {
    Utc::now().timestamp().max(0) as usize
}

/// Issues a token for `user_id` valid for `jwt_config.expiry_seconds`.
pub fn issue_token(user_id: UserId, role: Role, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let lifetime = jwt_config.expiry_seconds.max(0) as usize;
    let claims = Claims::new(user_id, role, now_timestamp(), lifetime);
    encode_claims(&claims, jwt_config)
}

/// Signs arbitrary claims. Exposed so tests can mint tokens with a chosen
/// `exp`.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// 401 "Invalid or expired token" when the token is malformed, signed with
/// another key, or `exp <= now`.
pub fn validate_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN_MESSAGE))?;

    // jsonwebtoken accepts exp == now; a token is already dead at that second.
    if claims.is_expired_at(now_timestamp()) {
        return Err(AppError::unauthorized(INVALID_TOKEN_MESSAGE));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNAUTHORIZED: u16 = 401;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret-for-unit-tests")
    }

    #[test]
    fn test_issued_token_validates() {
        let user_id = UserId::new();
        let token = issue_token(user_id, Role::Teacher, &config()).unwrap();

        let claims = validate_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_oversized_expiry_does_not_overflow() {
        let mut jwt_config = config();
        jwt_config.expiry_seconds = i64::MAX;

        let token = issue_token(UserId::new(), Role::Student, &jwt_config).unwrap();
        let claims = validate_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.exp, usize::MAX);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = now_timestamp();
        let claims = Claims {
            sub: UserId::new(),
            role: Role::Student,
            exp: now - 10,
            iat: now - 100,
        };
        let token = encode_claims(&claims, &config()).unwrap();

        let err = validate_token(&token, &config()).unwrap_err();
        assert_eq!(err.status.as_u16(), UNAUTHORIZED);
        assert_eq!(err.error.to_string(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn test_token_expiring_now_is_rejected() {
        let now = now_timestamp();
        let claims = Claims {
            sub: UserId::new(),
            role: Role::Student,
            exp: now,
            iat: now - 100,
        };
        let token = encode_claims(&claims, &config()).unwrap();
        assert!(validate_token(&token, &config()).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(UserId::new(), Role::Admin, &config()).unwrap();
        let other = JwtConfig::new("another-secret");

        let err = validate_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), UNAUTHORIZED);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let token = issue_token(UserId::new(), Role::Student, &config()).unwrap();
        let forged = issue_token(UserId::new(), Role::Admin, &config()).unwrap();

        // Header and signature of one token, payload of another.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(validate_token(&spliced, &config()).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(validate_token("not.a.jwt", &config()).is_err());
        assert!(validate_token("", &config()).is_err());
    }
}
