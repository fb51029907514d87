use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use gradebook_core::{ApiResponse, AppError, PaginationParams, success};
use gradebook_models::{
    Course, CreateCourseDto, PaginatedCoursesResponse, PaginatedTeacherCoursesResponse,
};
use tracing::instrument;

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a course and assign its teacher
#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created successfully", body = Course),
        (status = 400, description = "Teacher not found or not a teacher", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 409, description = "Course name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    let course = CourseService::create_course(state.store(), dto).await?;
    Ok(success(StatusCode::CREATED, "Course created successfully", course))
}

/// List all courses with their teachers
#[utoipa::path(
    get,
    path = "/api/admin/courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Courses retrieved successfully", body = PaginatedCoursesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admin only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<(StatusCode, Json<ApiResponse<PaginatedCoursesResponse>>), AppError> {
    let page = CourseService::list_courses(state.store(), &params).await?;
    Ok(success(StatusCode::OK, "Courses retrieved successfully", page))
}

/// List the courses the calling teacher owns
#[utoipa::path(
    get,
    path = "/api/teacher/courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Courses retrieved successfully", body = PaginatedTeacherCoursesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Teacher"
)]
#[instrument(skip(state), fields(teacher_id = %auth_user.user_id))]
pub async fn get_assigned_courses(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<(StatusCode, Json<ApiResponse<PaginatedTeacherCoursesResponse>>), AppError> {
    let page =
        CourseService::list_teacher_courses(state.store(), auth_user.user_id, &params).await?;
    Ok(success(StatusCode::OK, "Courses retrieved successfully", page))
}
