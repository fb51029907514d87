//! Persistence seams.
//!
//! Services talk to storage only through these traits. [`PgStore`] is the
//! production implementation; the in-memory store behind the `test-utils`
//! feature enforces the same uniqueness keys so the HTTP layer can be
//! exercised without a database.
//!
//! [`PgStore`]: crate::postgres::PgStore

use async_trait::async_trait;
use gradebook_models::{
    Course, CourseId, CourseWithTeacher, Email, Enrollment, Grade, GradeOutcome, GradeStat,
    GradeUpsert, GradeWithCourse, NewCourse, NewUser, Role, User, UserCredentials, UserId,
};

use crate::error::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] when the email is taken,
    /// compared case-insensitively.
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn find_credentials_by_email(&self, email: &Email)
    -> StoreResult<Option<UserCredentials>>;

    async fn email_exists(&self, email: &Email) -> StoreResult<bool>;

    /// One page of users with `role`, plus the total count for that role.
    async fn list_users_by_role(
        &self,
        role: Role,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] when the name is taken.
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course>;

    async fn find_course_by_id(&self, id: CourseId) -> StoreResult<Option<Course>>;

    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>>;

    async fn list_courses_with_teacher(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<CourseWithTeacher>, i64)>;

    async fn list_courses_by_teacher(
        &self,
        teacher_id: UserId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Course>, i64)>;

    /// Courses the student is enrolled in, ordered by name.
    async fn list_courses_by_student(&self, student_id: UserId) -> StoreResult<Vec<Course>>;
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fails with [`StoreError::UniqueViolation`] on a duplicate pair; the
    /// existing enrollment is left untouched.
    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> StoreResult<Enrollment>;

    async fn enrollment_exists(&self, student_id: UserId, course_id: CourseId)
    -> StoreResult<bool>;
}

#[async_trait]
pub trait GradeRepository: Send + Sync {
    /// Inserts the grade or overwrites marks and letter of the existing row
    /// for the same `(student_id, course_id)`.
    ///
    /// Fails with [`StoreError::ForeignKeyViolation`] if there is no matching
    /// enrollment.
    async fn upsert_grade(&self, grade: GradeUpsert) -> StoreResult<(Grade, GradeOutcome)>;

    async fn list_grades_by_student(&self, student_id: UserId)
    -> StoreResult<Vec<GradeWithCourse>>;

    /// Letter counts for one course, only letters present, A first.
    async fn grade_stats_by_course(&self, course_id: CourseId) -> StoreResult<Vec<GradeStat>>;
}

/// Everything the application needs from storage, as one object-safe handle.
pub trait Store: UserRepository + CourseRepository + EnrollmentRepository + GradeRepository {}

impl<T> Store for T where T: UserRepository + CourseRepository + EnrollmentRepository + GradeRepository
{}
