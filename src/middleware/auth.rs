//! Token authentication.
//!
//! [`authenticate`] validates the bearer token once per request and stores the
//! resulting [`AuthUser`] in the request extensions. Role middleware and
//! handlers read it back through the [`AuthUser`] extractor; nothing after
//! this point looks at the `Authorization` header again.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use gradebook_auth::{Claims, validate_token};
use gradebook_core::AppError;
use gradebook_models::{Role, UserId};

use crate::state::AppState;

pub const MISSING_HEADER_MESSAGE: &str = "Authorization header is required";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid authorization header format";
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

/// The caller's identity, as proven by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
        }
    }
}

/// Pulls the token out of an `Authorization` header value.
///
/// The value must be exactly `Bearer <token>`: two parts separated by a single
/// space, scheme spelled with a capital B.
pub fn parse_bearer(header_value: Option<&str>) -> Result<&str, AppError> {
    let value = header_value.ok_or_else(|| AppError::unauthorized(MISSING_HEADER_MESSAGE))?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(AppError::unauthorized(INVALID_FORMAT_MESSAGE)),
    }
}

/// Middleware that turns a bearer token into an [`AuthUser`] extension.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::unauthorized(INVALID_FORMAT_MESSAGE))?,
        ),
    };
    let token = parse_bearer(header_value)?;
    let claims = validate_token(token, &state.jwt_config)?;

    req.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}
