//! Course domain models and DTOs.

use crate::ids::{CourseId, UserId};
use crate::users::UserSummary;
use gradebook_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A course owned by exactly one teacher.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub teacher_id: UserId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub teacher_id: UserId,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 255, message = "Course name is required"))]
    pub name: String,
    pub teacher_id: UserId,
}

/// Course as listed to admins, with the owning teacher inlined.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseWithTeacher {
    pub id: CourseId,
    pub name: String,
    pub teacher: UserSummary,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Compact course view embedded in grade listings.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseSummary {
    pub id: CourseId,
    pub name: String,
}

impl From<Course> for CourseSummary {
    fn from(course: Course) -> Self {
        Self {
            id: course.id,
            name: course.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub items: Vec<CourseWithTeacher>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedTeacherCoursesResponse {
    pub items: Vec<Course>,
    pub meta: PaginationMeta,
}
