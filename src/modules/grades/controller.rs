use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use gradebook_core::{ApiResponse, AppError, success};
use gradebook_models::{
    CourseId, GpaSummary, Grade, GradeInputDto, GradeOutcome, GradeStat, GradeWithCourse,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Add or update a student's grade
#[utoipa::path(
    post,
    path = "/api/teacher/grades",
    request_body = GradeInputDto,
    responses(
        (status = 201, description = "Grade added successfully", body = Grade),
        (status = 200, description = "Grade updated successfully", body = Grade),
        (status = 400, description = "Marks out of range or student not enrolled", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Course not found or not owned by caller", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
#[instrument(skip(state, dto), fields(teacher_id = %auth_user.user_id))]
pub async fn add_or_update_grade(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<GradeInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<Grade>>), AppError> {
    let (grade, outcome) =
        GradeService::add_or_update_grade(state.store(), auth_user.user_id, dto).await?;

    Ok(match outcome {
        GradeOutcome::Created => success(StatusCode::CREATED, "Grade added successfully", grade),
        GradeOutcome::Updated => success(StatusCode::OK, "Grade updated successfully", grade),
    })
}

/// Grade letter distribution for one of the caller's courses
#[utoipa::path(
    get,
    path = "/api/teacher/courses/{course_id}/stats",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Grade statistics retrieved successfully", body = Vec<GradeStat>),
        (status = 400, description = "Invalid course ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Course not found or access denied", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
#[instrument(skip(state), fields(teacher_id = %auth_user.user_id))]
pub async fn get_grade_statistics(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(course_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<GradeStat>>>), AppError> {
    let course_id: CourseId = course_id
        .parse()
        .map_err(|_| AppError::bad_request("Invalid course ID"))?;

    let stats = GradeService::course_statistics(state.store(), auth_user.user_id, course_id).await?;
    Ok(success(
        StatusCode::OK,
        "Grade statistics retrieved successfully",
        stats,
    ))
}

/// List the caller's grades
#[utoipa::path(
    get,
    path = "/api/student/grades",
    responses(
        (status = 200, description = "Grades retrieved successfully", body = Vec<GradeWithCourse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
#[instrument(skip(state), fields(student_id = %auth_user.user_id))]
pub async fn get_student_grades(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<Vec<GradeWithCourse>>>), AppError> {
    let grades = GradeService::student_grades(state.store(), auth_user.user_id).await?;
    Ok(success(StatusCode::OK, "Grades retrieved successfully", grades))
}

/// Compute the caller's GPA on the 4.0 scale
#[utoipa::path(
    get,
    path = "/api/student/gpa",
    responses(
        (status = 200, description = "GPA calculated", body = GpaSummary),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - student only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Student"
)]
#[instrument(skip(state), fields(student_id = %auth_user.user_id))]
pub async fn get_student_gpa(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<(StatusCode, Json<ApiResponse<GpaSummary>>), AppError> {
    let summary = GradeService::student_gpa(state.store(), auth_user.user_id).await?;

    let message = if summary.courses_count.is_none() {
        "No grades available to calculate GPA"
    } else {
        "GPA calculated successfully"
    };
    Ok(success(StatusCode::OK, message, summary))
}
