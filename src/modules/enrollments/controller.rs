use axum::{Json, extract::State, http::StatusCode};
use gradebook_core::{ApiResponse, AppError, success};
use gradebook_models::{Course, EnrollStudentDto, Enrollment};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Enroll a student in one of the caller's courses
#[utoipa::path(
    post,
    path = "/api/teacher/enrollments",
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student enrolled successfully", body = Enrollment),
        (status = 400, description = "Student not found or already enrolled", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Course not found or not owned by caller", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
#[instrument(skip(state, dto), fields(teacher_id = %auth_user.user_id))]
pub async fn enroll_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<ApiResponse<Enrollment>>), AppError> {
    let enrollment =
        EnrollmentService::enroll_student(state.store(), auth_user.user_id, dto).await?;
    Ok(success(
        StatusCode::CREATED,
        "Student enrolled successfully",
        enrollment,
    ))
}

/// List the caller's enrolled courses
#[utoipa::path(
    get,
    path = "/api/student/courses",
    responses(
        (status = 200, description = "Courses retrieved successfully", body = Vec<Course>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
#[instrument(skip(state), fields(student_id = %auth_user.user_id))]
pub async fn get_student_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Course>>>), AppError> {
    let courses = EnrollmentService::student_courses(state.store(), auth_user.user_id).await?;
    Ok(success(StatusCode::OK, "Courses retrieved successfully", courses))
}
