use gradebook_core::PaginationMeta;
use gradebook_models::{
    Course, CourseSummary, CourseWithTeacher, CreateCourseDto, CreateUserDto, EnrollStudentDto,
    Enrollment, GpaSummary, Grade, GradeInputDto, GradeLetter, GradeStat, GradeWithCourse,
    LoginRequest, LoginResponse, PaginatedCoursesResponse, PaginatedTeacherCoursesResponse,
    PaginatedUsersResponse, RegisterRequestDto, Role, User, UserSummary,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::modules::health::HealthResponse;

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_students,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_assigned_courses,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::get_student_courses,
        crate::modules::grades::controller::add_or_update_grade,
        crate::modules::grades::controller::get_grade_statistics,
        crate::modules::grades::controller::get_student_grades,
        crate::modules::grades::controller::get_student_gpa,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            Role,
            User,
            UserSummary,
            CreateUserDto,
            RegisterRequestDto,
            LoginRequest,
            LoginResponse,
            Course,
            CourseSummary,
            CourseWithTeacher,
            CreateCourseDto,
            Enrollment,
            EnrollStudentDto,
            Grade,
            GradeLetter,
            GradeInputDto,
            GradeStat,
            GradeWithCourse,
            GpaSummary,
            PaginationMeta,
            PaginatedUsersResponse,
            PaginatedCoursesResponse,
            PaginatedTeacherCoursesResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service liveness"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Admin", description = "User and course provisioning"),
        (name = "Teacher", description = "Enrollment and grading for owned courses"),
        (name = "Student", description = "The caller's own courses, grades and GPA")
    ),
    info(
        title = "Gradebook API",
        version = "0.1.0",
        description = "Role-gated academic records: admins provision, teachers grade, students read their own records. Successful responses are wrapped as `{message, data}`.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
