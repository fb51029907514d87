//! # Gradebook Models
//!
//! Domain models and DTOs for the Gradebook API.
//!
//! - [`ids`]: typed `Uuid` identifiers per entity
//! - [`value_types`]: the case-normalized [`Email`]
//! - [`roles`]: the closed [`Role`] set
//! - [`users`], [`courses`], [`enrollments`]: entities and request DTOs
//! - [`grades`]: grade letters, grade records, statistics and GPA
//! - [`auth`]: login payloads

/// Stores an enum as Postgres `TEXT` through its `as_str` / `FromStr` pair.
macro_rules! impl_text_column {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                s.parse::<$name>().map_err(Into::into)
            }
        }
    };
}

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod ids;
pub mod roles;
pub mod users;
pub mod value_types;

pub use auth::{LoginRequest, LoginResponse, RegisterRequestDto};
pub use courses::{
    Course, CourseSummary, CourseWithTeacher, CreateCourseDto, NewCourse,
    PaginatedCoursesResponse, PaginatedTeacherCoursesResponse,
};
pub use enrollments::{EnrollStudentDto, Enrollment};
pub use grades::{
    GpaSummary, Grade, GradeInputDto, GradeLetter, GradeOutcome, GradeStat, GradeUpsert,
    GradeWithCourse, compute_gpa, marks_in_range,
};
pub use ids::{CourseId, EnrollmentId, GradeId, UserId};
pub use roles::Role;
pub use users::{
    CreateUserDto, NewUser, PaginatedUsersResponse, User, UserCredentials, UserSummary,
};
pub use value_types::{Email, ValueTypeError};
