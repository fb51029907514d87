#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gradebook::router::init_router;
use gradebook::state::AppState;
use gradebook_auth::issue_token;
use gradebook_config::{JwtConfig, PasswordConfig};
use gradebook_core::hash_password_with_cost;
use gradebook_db::{CourseRepository, EnrollmentRepository, MemoryStore, UserRepository};
use gradebook_models::{Course, Email, NewCourse, NewUser, Role, User};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "password123";

/// Lowest bcrypt cost; keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// The full router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt_config: JwtConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_password_cost(TEST_BCRYPT_COST)
    }

    /// Same router, hashing new accounts at `cost`.
    pub fn with_password_cost(cost: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        let jwt_config = JwtConfig::new(TEST_SECRET);
        let state = AppState::new(store.clone(), jwt_config.clone())
            .with_password_config(PasswordConfig::with_cost(cost));

        Self {
            router: init_router(state, None),
            store,
            jwt_config,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Inserts a user straight into the store with [`TEST_PASSWORD`].
    pub async fn create_user(&self, role: Role) -> User {
        let password_hash = hash_password_with_cost(TEST_PASSWORD, TEST_BCRYPT_COST).unwrap();
        self.store
            .create_user(NewUser {
                name: format!("Test {}", role),
                email: Email::new(generate_unique_email()).unwrap(),
                password_hash,
                role,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &User) -> String {
        issue_token(user.id, user.role, &self.jwt_config).unwrap()
    }

    /// Creates a user with `role` and returns it with a session token.
    pub async fn signed_in(&self, role: Role) -> (User, String) {
        let user = self.create_user(role).await;
        let token = self.token_for(&user);
        (user, token)
    }

    pub async fn create_course(&self, teacher: &User) -> Course {
        self.store
            .create_course(NewCourse {
                name: generate_unique_course_name(),
                teacher_id: teacher.id,
            })
            .await
            .unwrap()
    }

    pub async fn enroll(&self, student: &User, course: &Course) {
        self.store
            .create_enrollment(student.id, course.id)
            .await
            .unwrap();
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_course_name() -> String {
    format!("Course {}", Uuid::new_v4())
}
