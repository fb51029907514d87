use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::grades::controller::{
    add_or_update_grade, get_grade_statistics, get_student_gpa, get_student_grades,
};
use crate::state::AppState;

pub fn init_teacher_grades_router() -> Router<AppState> {
    Router::new()
        .route("/grades", post(add_or_update_grade))
        .route("/courses/{course_id}/stats", get(get_grade_statistics))
}

pub fn init_student_grades_router() -> Router<AppState> {
    Router::new()
        .route("/grades", get(get_student_grades))
        .route("/gpa", get(get_student_gpa))
}
