//! Role-based authorization middleware.
//!
//! These run inside [`authenticate`](crate::middleware::auth::authenticate)
//! and only read the [`AuthUser`] it left in the request extensions.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gradebook_core::AppError;
use gradebook_models::Role;

use crate::middleware::auth::{AuthUser, UNAUTHORIZED_MESSAGE};

pub const FORBIDDEN_MESSAGE: &str = "Forbidden: insufficient permissions";

/// Checks that an authenticated caller holds one of `allowed_roles`.
pub fn check_any_role(
    auth_user: Option<&AuthUser>,
    allowed_roles: &[Role],
) -> Result<AuthUser, AppError> {
    let auth_user = auth_user.ok_or_else(|| AppError::unauthorized(UNAUTHORIZED_MESSAGE))?;

    if !allowed_roles.contains(&auth_user.role) {
        return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
    }

    Ok(*auth_user)
}

/// Middleware body shared by the `require_*` helpers.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/grades", post(add_grade))
///     .route_layer(middleware::from_fn(|req, next| {
///         require_roles(req, next, &[Role::Teacher])
///     }));
/// ```
pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    check_any_role(req.extensions().get::<AuthUser>(), allowed_roles)?;
    Ok(next.run(req).await)
}

async fn require_single(req: Request, next: Next, role: Role) -> Response {
    match require_roles(req, next, &[role]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    require_single(req, next, Role::Admin).await
}

pub async fn require_teacher(req: Request, next: Next) -> Response {
    require_single(req, next, Role::Teacher).await
}

pub async fn require_student(req: Request, next: Next) -> Response {
    require_single(req, next, Role::Student).await
}
