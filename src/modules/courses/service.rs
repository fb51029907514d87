use gradebook_core::{AppError, PaginationParams};
use gradebook_db::Store;
use gradebook_models::{
    Course, CourseId, CreateCourseDto, NewCourse, PaginatedCoursesResponse,
    PaginatedTeacherCoursesResponse, Role, UserId,
};
use tracing::{info, instrument};

pub const COURSE_NAME_TAKEN_MESSAGE: &str = "Course name already exists";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store, dto), fields(name = %dto.name, teacher_id = %dto.teacher_id))]
    pub async fn create_course(
        store: &dyn Store,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Course name is required"));
        }

        let teacher = store
            .find_user_by_id(dto.teacher_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Teacher not found"))?;

        if teacher.role != Role::Teacher {
            return Err(AppError::bad_request("Assigned user is not a teacher"));
        }

        let course = store
            .create_course(NewCourse {
                name: name.to_string(),
                teacher_id: teacher.id,
            })
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::conflict(COURSE_NAME_TAKEN_MESSAGE)
                } else {
                    AppError::from(e)
                }
            })?;

        info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    #[instrument(skip(store))]
    pub async fn list_courses(
        store: &dyn Store,
        params: &PaginationParams,
    ) -> Result<PaginatedCoursesResponse, AppError> {
        let (items, total) = store
            .list_courses_with_teacher(params.limit(), params.offset())
            .await?;

        Ok(PaginatedCoursesResponse {
            items,
            meta: params.meta(total),
        })
    }

    #[instrument(skip(store))]
    pub async fn list_teacher_courses(
        store: &dyn Store,
        teacher_id: UserId,
        params: &PaginationParams,
    ) -> Result<PaginatedTeacherCoursesResponse, AppError> {
        let (items, total) = store
            .list_courses_by_teacher(teacher_id, params.limit(), params.offset())
            .await?;

        Ok(PaginatedTeacherCoursesResponse {
            items,
            meta: params.meta(total),
        })
    }

    /// Loads a course the teacher owns.
    ///
    /// A missing course and someone else's course produce the same 403 with
    /// `denied_message`, so course ids cannot be probed.
    pub async fn find_owned_course(
        store: &dyn Store,
        teacher_id: UserId,
        course_id: CourseId,
        denied_message: &'static str,
    ) -> Result<Course, AppError> {
        match store.find_course_by_id(course_id).await? {
            Some(course) if course.teacher_id == teacher_id => Ok(course),
            _ => Err(AppError::forbidden(denied_message)),
        }
    }
}
