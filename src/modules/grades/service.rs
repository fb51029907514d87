use gradebook_core::AppError;
use gradebook_db::{Store, StoreError};
use gradebook_models::{
    CourseId, GpaSummary, Grade, GradeInputDto, GradeLetter, GradeOutcome, GradeStat,
    GradeUpsert, GradeWithCourse, UserId, marks_in_range,
};
use tracing::{info, instrument};

use crate::metrics::track_grade_recorded;
use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::service::COURSE_ACCESS_DENIED_MESSAGE;

pub const NOT_ENROLLED_MESSAGE: &str = "Student is not enrolled in this course";
pub const STATS_ACCESS_DENIED_MESSAGE: &str = "Course not found or access denied";

pub struct GradeService;

impl GradeService {
    /// Records marks for an enrolled student, replacing any earlier grade for
    /// the same course.
    #[instrument(skip(store))]
    pub async fn add_or_update_grade(
        store: &dyn Store,
        teacher_id: UserId,
        dto: GradeInputDto,
    ) -> Result<(Grade, GradeOutcome), AppError> {
        let course = CourseService::find_owned_course(
            store,
            teacher_id,
            dto.course_id,
            COURSE_ACCESS_DENIED_MESSAGE,
        )
        .await?;

        if !marks_in_range(dto.marks) {
            return Err(AppError::bad_request("Marks must be between 0 and 100"));
        }

        if !store.enrollment_exists(dto.student_id, course.id).await? {
            return Err(AppError::bad_request(NOT_ENROLLED_MESSAGE));
        }

        let (grade, outcome) = store
            .upsert_grade(GradeUpsert::new(dto.student_id, course.id, dto.marks))
            .await
            .map_err(|e| match e {
                StoreError::ForeignKeyViolation { .. } => {
                    AppError::bad_request(NOT_ENROLLED_MESSAGE)
                }
                other => AppError::from(other),
            })?;

        info!(
            grade_id = %grade.id,
            grade_letter = %grade.grade_letter,
            outcome = outcome.as_str(),
            "Grade recorded"
        );
        track_grade_recorded(outcome);

        Ok((grade, outcome))
    }

    #[instrument(skip(store))]
    pub async fn course_statistics(
        store: &dyn Store,
        teacher_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<GradeStat>, AppError> {
        let course = CourseService::find_owned_course(
            store,
            teacher_id,
            course_id,
            STATS_ACCESS_DENIED_MESSAGE,
        )
        .await?;

        Ok(store.grade_stats_by_course(course.id).await?)
    }

    #[instrument(skip(store))]
    pub async fn student_grades(
        store: &dyn Store,
        student_id: UserId,
    ) -> Result<Vec<GradeWithCourse>, AppError> {
        Ok(store.list_grades_by_student(student_id).await?)
    }

    #[instrument(skip(store))]
    pub async fn student_gpa(
        store: &dyn Store,
        student_id: UserId,
    ) -> Result<GpaSummary, AppError> {
        let letters: Vec<GradeLetter> = store
            .list_grades_by_student(student_id)
            .await?
            .into_iter()
            .map(|grade| grade.grade_letter)
            .collect();

        Ok(GpaSummary::from_letters(&letters))
    }
}
