//! PostgreSQL store.

use async_trait::async_trait;
use gradebook_models::{
    Course, CourseId, CourseSummary, CourseWithTeacher, Email, Enrollment, EnrollmentId, Grade,
    GradeId, GradeLetter, GradeOutcome, GradeStat, GradeUpsert, GradeWithCourse, NewCourse,
    NewUser, Role, User, UserCredentials, UserId, UserSummary,
};
use sqlx::{FromRow, PgPool};

use crate::store::{
    CourseRepository, EnrollmentRepository, GradeRepository, StoreResult, UserRepository,
};

const USER_COLUMNS: &str = "id, name, email, role, created_at";
const COURSE_COLUMNS: &str = "id, name, teacher_id, created_at";
const GRADE_COLUMNS: &str =
    "id, student_id, course_id, marks, grade_letter, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct CourseTeacherRow {
    id: CourseId,
    name: String,
    created_at: chrono::DateTime<chrono::Utc>,
    teacher_id: UserId,
    teacher_name: String,
    teacher_email: Email,
    teacher_role: Role,
}

impl From<CourseTeacherRow> for CourseWithTeacher {
    fn from(row: CourseTeacherRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            teacher: UserSummary {
                id: row.teacher_id,
                name: row.teacher_name,
                email: row.teacher_email,
                role: row.teacher_role,
            },
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct GradeCourseRow {
    id: GradeId,
    marks: f64,
    grade_letter: GradeLetter,
    updated_at: chrono::DateTime<chrono::Utc>,
    course_id: CourseId,
    course_name: String,
}

impl From<GradeCourseRow> for GradeWithCourse {
    fn from(row: GradeCourseRow) -> Self {
        Self {
            id: row.id,
            course: CourseSummary {
                id: row.course_id,
                name: row.course_name,
            },
            marks: row.marks,
            grade_letter: row.grade_letter,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct UpsertedGradeRow {
    #[sqlx(flatten)]
    grade: Grade,
    inserted: bool,
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(UserId::new())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> StoreResult<Option<UserCredentials>> {
        let sql = format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE lower(email) = lower($1)"
        );
        let credentials = sqlx::query_as::<_, UserCredentials>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(credentials)
    }

    async fn email_exists(&self, email: &Email) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE lower(email) = lower($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn list_users_by_role(
        &self,
        role: Role,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 \
             ORDER BY created_at, id LIMIT $2 OFFSET $3"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let sql = format!(
            "INSERT INTO courses (id, name, teacher_id) VALUES ($1, $2, $3) \
             RETURNING {COURSE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Course>(&sql)
            .bind(CourseId::new())
            .bind(&course.name)
            .bind(course.teacher_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_course_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(course)
    }

    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE name = $1");
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(course)
    }

    async fn list_courses_with_teacher(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<CourseWithTeacher>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, CourseTeacherRow>(
            r#"
            SELECT c.id, c.name, c.created_at,
                   u.id AS teacher_id, u.name AS teacher_name,
                   u.email AS teacher_email, u.role AS teacher_role
            FROM courses c
            JOIN users u ON u.id = c.teacher_id
            ORDER BY c.name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn list_courses_by_teacher(
        &self,
        teacher_id: UserId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Course>, i64)> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE teacher_id = $1")
                .bind(teacher_id)
                .fetch_one(&self.pool)
                .await?;

        let sql = format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE teacher_id = $1 \
             ORDER BY name LIMIT $2 OFFSET $3"
        );
        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(teacher_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((courses, total))
    }

    async fn list_courses_by_student(&self, student_id: UserId) -> StoreResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT c.id, c.name, c.teacher_id, c.created_at
            FROM courses c
            JOIN enrollments e ON e.course_id = c.id
            WHERE e.student_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }
}

#[async_trait]
impl EnrollmentRepository for PgStore {
    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> StoreResult<Enrollment> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (id, student_id, course_id) VALUES ($1, $2, $3) \
             RETURNING id, student_id, course_id, created_at",
        )
        .bind(EnrollmentId::new())
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(enrollment)
    }

    async fn enrollment_exists(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM enrollments WHERE student_id = $1 AND course_id = $2)",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

#[async_trait]
impl GradeRepository for PgStore {
    async fn upsert_grade(&self, grade: GradeUpsert) -> StoreResult<(Grade, GradeOutcome)> {
        // xmax is 0 only for a row version created by a plain insert.
        let sql = format!(
            "INSERT INTO grades (id, student_id, course_id, marks, grade_letter) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (student_id, course_id) DO UPDATE \
             SET marks = EXCLUDED.marks, grade_letter = EXCLUDED.grade_letter, updated_at = NOW() \
             RETURNING {GRADE_COLUMNS}, (xmax = 0) AS inserted"
        );
        let row = sqlx::query_as::<_, UpsertedGradeRow>(&sql)
            .bind(GradeId::new())
            .bind(grade.student_id)
            .bind(grade.course_id)
            .bind(grade.marks)
            .bind(grade.grade_letter)
            .fetch_one(&self.pool)
            .await?;

        let outcome = if row.inserted {
            GradeOutcome::Created
        } else {
            GradeOutcome::Updated
        };
        Ok((row.grade, outcome))
    }

    async fn list_grades_by_student(
        &self,
        student_id: UserId,
    ) -> StoreResult<Vec<GradeWithCourse>> {
        let rows = sqlx::query_as::<_, GradeCourseRow>(
            r#"
            SELECT g.id, g.marks, g.grade_letter, g.updated_at,
                   c.id AS course_id, c.name AS course_name
            FROM grades g
            JOIN courses c ON c.id = g.course_id
            WHERE g.student_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn grade_stats_by_course(&self, course_id: CourseId) -> StoreResult<Vec<GradeStat>> {
        let stats = sqlx::query_as::<_, GradeStat>(
            "SELECT grade_letter, COUNT(*) AS count FROM grades \
             WHERE course_id = $1 GROUP BY grade_letter ORDER BY grade_letter",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stats)
    }
}
