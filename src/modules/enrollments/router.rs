use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::enrollments::controller::{enroll_student, get_student_courses};
use crate::state::AppState;

pub fn init_teacher_enrollments_router() -> Router<AppState> {
    Router::new().route("/enrollments", post(enroll_student))
}

pub fn init_student_courses_router() -> Router<AppState> {
    Router::new().route("/courses", get(get_student_courses))
}
