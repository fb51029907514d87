//! In-memory store used by tests.
//!
//! All tables sit behind one mutex, so every trait method is atomic. The same
//! keys as the Postgres schema are enforced: email (case-insensitive), course
//! name, and `(student_id, course_id)` for enrollments and grades. Foreign
//! keys are checked too, so a grade without an enrollment is refused here
//! exactly as it is by the database.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use gradebook_models::{
    Course, CourseId, CourseSummary, CourseWithTeacher, Email, Enrollment, EnrollmentId, Grade,
    GradeId, GradeOutcome, GradeStat, GradeUpsert, GradeWithCourse, NewCourse, NewUser, Role,
    User, UserCredentials, UserId, UserSummary,
};

use crate::error::StoreError;
use crate::store::{
    CourseRepository, EnrollmentRepository, GradeRepository, StoreResult, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    grades: Vec<Grade>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A panicking test thread must not take the other tests down with it.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn grade_count(&self) -> usize {
        self.lock().grades.len()
    }

    pub fn enrollment_count(&self) -> usize {
        self.lock().enrollments.len()
    }
}

fn page<T: Clone>(items: &[T], limit: i64, offset: i64) -> Vec<T> {
    items
        .iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

impl Tables {
    fn user(&self, id: UserId) -> Option<&User> {
        self.users
            .iter()
            .map(|credentials| &credentials.user)
            .find(|user| user.id == id)
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    fn is_enrolled(&self, student_id: UserId, course_id: CourseId) -> bool {
        self.enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut tables = self.lock();
        // Email is normalized on construction, so equality is case-insensitive.
        if tables.users.iter().any(|c| c.user.email == user.email) {
            return Err(StoreError::unique("users_email_lower_key"));
        }

        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.users.push(UserCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn find_user_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> StoreResult<Option<UserCredentials>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|c| &c.user.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &Email) -> StoreResult<bool> {
        Ok(self.lock().users.iter().any(|c| &c.user.email == email))
    }

    async fn list_users_by_role(
        &self,
        role: Role,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<User>, i64)> {
        let tables = self.lock();
        let mut matching: Vec<User> = tables
            .users
            .iter()
            .filter(|c| c.user.role == role)
            .map(|c| c.user.clone())
            .collect();
        matching.sort_by_key(|u| (u.created_at, u.id));
        let total = matching.len() as i64;
        Ok((page(&matching, limit, offset), total))
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn create_course(&self, course: NewCourse) -> StoreResult<Course> {
        let mut tables = self.lock();
        if tables.courses.iter().any(|c| c.name == course.name) {
            return Err(StoreError::unique("courses_name_key"));
        }
        if tables.user(course.teacher_id).is_none() {
            return Err(StoreError::foreign_key("courses_teacher_id_fkey"));
        }

        let created = Course {
            id: CourseId::new(),
            name: course.name,
            teacher_id: course.teacher_id,
            created_at: Utc::now(),
        };
        tables.courses.push(created.clone());
        Ok(created)
    }

    async fn find_course_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        Ok(self.lock().course(id).cloned())
    }

    async fn find_course_by_name(&self, name: &str) -> StoreResult<Option<Course>> {
        Ok(self.lock().courses.iter().find(|c| c.name == name).cloned())
    }

    async fn list_courses_with_teacher(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<CourseWithTeacher>, i64)> {
        let tables = self.lock();
        let mut courses: Vec<CourseWithTeacher> = tables
            .courses
            .iter()
            .filter_map(|course| {
                let teacher = tables.user(course.teacher_id)?;
                Some(CourseWithTeacher {
                    id: course.id,
                    name: course.name.clone(),
                    teacher: UserSummary::from(teacher.clone()),
                    created_at: course.created_at,
                })
            })
            .collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name));

        let total = courses.len() as i64;
        Ok((page(&courses, limit, offset), total))
    }

    async fn list_courses_by_teacher(
        &self,
        teacher_id: UserId,
        limit: i64,
        offset: i64,
    ) -> StoreResult<(Vec<Course>, i64)> {
        let tables = self.lock();
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|c| c.teacher_id == teacher_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name));

        let total = courses.len() as i64;
        Ok((page(&courses, limit, offset), total))
    }

    async fn list_courses_by_student(&self, student_id: UserId) -> StoreResult<Vec<Course>> {
        let tables = self.lock();
        let mut courses: Vec<Course> = tables
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .filter_map(|e| tables.course(e.course_id).cloned())
            .collect();
        courses.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(courses)
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn create_enrollment(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> StoreResult<Enrollment> {
        let mut tables = self.lock();
        if tables.is_enrolled(student_id, course_id) {
            return Err(StoreError::unique("enrollments_student_id_course_id_key"));
        }
        if tables.user(student_id).is_none() {
            return Err(StoreError::foreign_key("enrollments_student_id_fkey"));
        }
        if tables.course(course_id).is_none() {
            return Err(StoreError::foreign_key("enrollments_course_id_fkey"));
        }

        let enrollment = Enrollment {
            id: EnrollmentId::new(),
            student_id,
            course_id,
            created_at: Utc::now(),
        };
        tables.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn enrollment_exists(
        &self,
        student_id: UserId,
        course_id: CourseId,
    ) -> StoreResult<bool> {
        Ok(self.lock().is_enrolled(student_id, course_id))
    }
}

#[async_trait]
impl GradeRepository for MemoryStore {
    async fn upsert_grade(&self, grade: GradeUpsert) -> StoreResult<(Grade, GradeOutcome)> {
        let mut tables = self.lock();
        if !tables.is_enrolled(grade.student_id, grade.course_id) {
            return Err(StoreError::foreign_key("grades_enrollment_fkey"));
        }

        let now = Utc::now();
        if let Some(existing) = tables
            .grades
            .iter_mut()
            .find(|g| g.student_id == grade.student_id && g.course_id == grade.course_id)
        {
            existing.marks = grade.marks;
            existing.grade_letter = grade.grade_letter;
            existing.updated_at = now;
            return Ok((existing.clone(), GradeOutcome::Updated));
        }

        let created = Grade {
            id: GradeId::new(),
            student_id: grade.student_id,
            course_id: grade.course_id,
            marks: grade.marks,
            grade_letter: grade.grade_letter,
            created_at: now,
            updated_at: now,
        };
        tables.grades.push(created.clone());
        Ok((created, GradeOutcome::Created))
    }

    async fn list_grades_by_student(
        &self,
        student_id: UserId,
    ) -> StoreResult<Vec<GradeWithCourse>> {
        let tables = self.lock();
        let mut grades: Vec<GradeWithCourse> = tables
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .filter_map(|g| {
                let course = tables.course(g.course_id)?;
                Some(GradeWithCourse {
                    id: g.id,
                    course: CourseSummary::from(course.clone()),
                    marks: g.marks,
                    grade_letter: g.grade_letter,
                    updated_at: g.updated_at,
                })
            })
            .collect();
        grades.sort_by(|a, b| a.course.name.cmp(&b.course.name));
        Ok(grades)
    }

    async fn grade_stats_by_course(&self, course_id: CourseId) -> StoreResult<Vec<GradeStat>> {
        let tables = self.lock();
        let mut stats: Vec<GradeStat> = Vec::new();
        for grade in tables.grades.iter().filter(|g| g.course_id == course_id) {
            match stats.iter_mut().find(|s| s.grade_letter == grade.grade_letter) {
                Some(stat) => stat.count += 1,
                None => stats.push(GradeStat {
                    grade_letter: grade.grade_letter,
                    count: 1,
                }),
            }
        }
        stats.sort_by_key(|s| s.grade_letter);
        Ok(stats)
    }
}
