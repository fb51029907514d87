use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{create_user, get_students};
use crate::state::AppState;

pub fn init_admin_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/students", get(get_students))
}
