use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use gradebook_core::{ApiResponse, AppError, PaginationParams, success};
use gradebook_models::{CreateUserDto, PaginatedUsersResponse, User};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a teacher or student account
#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Validation error or admin role requested", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto), fields(admin_id = %auth_user.user_id))]
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user = UserService::create_user(state.store(), &state.password_config, dto).await?;
    Ok(success(StatusCode::CREATED, "User created successfully", user))
}

/// List students
#[utoipa::path(
    get,
    path = "/api/admin/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "Students retrieved successfully", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<(StatusCode, Json<ApiResponse<PaginatedUsersResponse>>), AppError> {
    let page = UserService::list_students(state.store(), &params).await?;
    Ok(success(StatusCode::OK, "Students retrieved successfully", page))
}
