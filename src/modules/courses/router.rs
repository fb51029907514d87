use axum::{Router, routing::get};

use crate::modules::courses::controller::{create_course, get_assigned_courses, get_courses};
use crate::state::AppState;

pub fn init_admin_courses_router() -> Router<AppState> {
    Router::new().route("/courses", get(get_courses).post(create_course))
}

pub fn init_teacher_courses_router() -> Router<AppState> {
    Router::new().route("/courses", get(get_assigned_courses))
}
