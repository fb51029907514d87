//! Course, enrollment and grade seeding. Each helper leaves existing rows
//! untouched.

use gradebook_db::Store;
use gradebook_models::{Course, CourseId, GradeUpsert, NewCourse, UserId};

pub async fn ensure_course(
    store: &dyn Store,
    name: &str,
    teacher_id: UserId,
) -> anyhow::Result<(Course, bool)> {
    if let Some(existing) = store.find_course_by_name(name).await? {
        return Ok((existing, false));
    }

    let course = store
        .create_course(NewCourse {
            name: name.to_string(),
            teacher_id,
        })
        .await?;
    Ok((course, true))
}

pub async fn ensure_enrollment(
    store: &dyn Store,
    student_id: UserId,
    course_id: CourseId,
) -> anyhow::Result<bool> {
    if store.enrollment_exists(student_id, course_id).await? {
        return Ok(false);
    }
    store.create_enrollment(student_id, course_id).await?;
    Ok(true)
}

/// Records `marks` only if the student has no grade in the course yet.
pub async fn ensure_grade(
    store: &dyn Store,
    student_id: UserId,
    course_id: CourseId,
    marks: f64,
) -> anyhow::Result<bool> {
    let graded = store
        .list_grades_by_student(student_id)
        .await?
        .iter()
        .any(|grade| grade.course.id == course_id);
    if graded {
        return Ok(false);
    }

    store
        .upsert_grade(GradeUpsert::new(student_id, course_id, marks))
        .await?;
    Ok(true)
}
