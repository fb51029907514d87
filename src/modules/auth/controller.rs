use axum::{Json, extract::State, http::StatusCode};
use gradebook_core::{ApiResponse, AppError, success};
use gradebook_models::{LoginRequest, LoginResponse, RegisterRequestDto, User};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register as a student
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Student registered successfully", body = User),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user = AuthService::register_student(state.store(), &state.password_config, dto).await?;
    Ok(success(
        StatusCode::CREATED,
        "Student registered successfully",
        user,
    ))
}

/// Log in and receive a session token
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoginResponse>>), AppError> {
    let response =
        AuthService::login(state.store(), &state.jwt_config, &state.password_config, dto).await?;
    Ok(success(StatusCode::OK, "Login successful", response))
}
