use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::authenticate;
use crate::middleware::role::{require_admin, require_student, require_teacher};
use crate::modules::auth::router::init_auth_router;
use crate::modules::courses::router::{init_admin_courses_router, init_teacher_courses_router};
use crate::modules::enrollments::router::{
    init_student_courses_router, init_teacher_enrollments_router,
};
use crate::modules::grades::router::{init_student_grades_router, init_teacher_grades_router};
use crate::modules::health::init_health_router;
use crate::modules::users::router::init_admin_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};

/// Protected routes. `authenticate` is layered last so it runs before every
/// role check.
fn init_api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest(
            "/admin",
            init_admin_users_router()
                .merge(init_admin_courses_router())
                .route_layer(middleware::from_fn(require_admin)),
        )
        .nest(
            "/teacher",
            init_teacher_courses_router()
                .merge(init_teacher_enrollments_router())
                .merge(init_teacher_grades_router())
                .route_layer(middleware::from_fn(require_teacher)),
        )
        .nest(
            "/student",
            init_student_courses_router()
                .merge(init_student_grades_router())
                .route_layer(middleware::from_fn(require_student)),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let mut router = Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(init_health_router())
        .merge(init_auth_router())
        .nest("/api", init_api_router(&state));

    if let Some(handle) = metrics_handle {
        router = router.route("/metrics", get(move || async move { handle.render() }));
    }

    router
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
