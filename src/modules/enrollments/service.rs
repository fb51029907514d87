use gradebook_core::AppError;
use gradebook_db::Store;
use gradebook_models::{Course, EnrollStudentDto, Enrollment, Role, UserId};
use tracing::{info, instrument};

use crate::metrics::track_enrollment_created;
use crate::modules::courses::service::CourseService;

pub const COURSE_ACCESS_DENIED_MESSAGE: &str = "Course not found or you don't have access";
pub const ALREADY_ENROLLED_MESSAGE: &str = "Student is already enrolled in this course";

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(store))]
    pub async fn enroll_student(
        store: &dyn Store,
        teacher_id: UserId,
        dto: EnrollStudentDto,
    ) -> Result<Enrollment, AppError> {
        let course = CourseService::find_owned_course(
            store,
            teacher_id,
            dto.course_id,
            COURSE_ACCESS_DENIED_MESSAGE,
        )
        .await?;

        match store.find_user_by_id(dto.student_id).await? {
            Some(user) if user.role == Role::Student => {}
            _ => return Err(AppError::bad_request("Student not found")),
        }

        if store.enrollment_exists(dto.student_id, course.id).await? {
            return Err(AppError::bad_request(ALREADY_ENROLLED_MESSAGE));
        }

        let enrollment = store
            .create_enrollment(dto.student_id, course.id)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::bad_request(ALREADY_ENROLLED_MESSAGE)
                } else {
                    AppError::from(e)
                }
            })?;

        info!(enrollment_id = %enrollment.id, "Student enrolled");
        track_enrollment_created();

        Ok(enrollment)
    }

    #[instrument(skip(store))]
    pub async fn student_courses(
        store: &dyn Store,
        student_id: UserId,
    ) -> Result<Vec<Course>, AppError> {
        Ok(store.list_courses_by_student(student_id).await?)
    }
}
