mod common;

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use common::{TEST_PASSWORD, TestApp, generate_unique_email};
use gradebook_auth::validate_token;
use gradebook_models::Role;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "Server is running"}));
}

#[tokio::test]
async fn test_register_creates_student() {
    let app = TestApp::new();
    let email = generate_unique_email();

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "Asha", "email": email, "password": "secret123"}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student registered successfully");
    assert_eq!(body["data"]["role"], "student");
    assert_eq!(body["data"]["email"], email);
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_register_ignores_role_override() {
    let app = TestApp::new();

    for role in ["admin", "teacher"] {
        let (status, body) = app
            .post(
                "/register",
                None,
                json!({
                    "name": "Sneaky",
                    "email": generate_unique_email(),
                    "password": "secret123",
                    "role": role
                }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["role"], "student");
    }
}

#[tokio::test]
async fn test_register_lowercases_email_and_rejects_duplicates() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "Asha", "email": "Asha.Rao@Example.com", "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "asha.rao@example.com");

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "Asha", "email": "ASHA.RAO@example.com", "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "Asha", "email": generate_unique_email(), "password": "short"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters");

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "Asha", "email": "not-an-email", "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"email": generate_unique_email(), "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "name is required");

    let (status, body) = app
        .post(
            "/register",
            None,
            json!({"name": "   ", "email": generate_unique_email(), "password": "secret123"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = TestApp::new();
    let student = app.create_user(Role::Student).await;

    let (status, body) = app
        .post(
            "/login",
            None,
            json!({"email": student.email.as_str(), "password": TEST_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["email"], student.email.as_str());
    assert_eq!(body["data"]["user"]["role"], "student");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let token = body["data"]["token"].as_str().unwrap();
    let claims = validate_token(token, &app.jwt_config).unwrap();
    assert_eq!(claims.sub, student.id);
    assert_eq!(claims.role, Role::Student);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    let teacher = app.create_user(Role::Teacher).await;

    let (status, _) = app
        .post(
            "/login",
            None,
            json!({"email": teacher.email.as_str().to_uppercase(), "password": TEST_PASSWORD}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    let student = app.create_user(Role::Student).await;

    let wrong_password = app
        .post(
            "/login",
            None,
            json!({"email": student.email.as_str(), "password": "wrong-password"}),
        )
        .await;
    let unknown_email = app
        .post(
            "/login",
            None,
            json!({"email": generate_unique_email(), "password": TEST_PASSWORD}),
        )
        .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.1, json!({"error": "Invalid email or password"}));
}

/// Fastest of a few `/login` attempts with `payload`.
async fn fastest_login(app: &TestApp, payload: serde_json::Value) -> Duration {
    let mut fastest = Duration::MAX;
    for _ in 0..3 {
        let started = Instant::now();
        let (status, _) = app.post("/login", None, payload.clone()).await;
        fastest = fastest.min(started.elapsed());
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    fastest
}

#[tokio::test]
async fn test_login_failures_cost_the_same_bcrypt_work() {
    // High enough that one bcrypt verification dwarfs everything else.
    let app = TestApp::with_password_cost(8);
    let email = generate_unique_email();
    app.post(
        "/register",
        None,
        json!({"name": "Timing", "email": email, "password": "secret123"}),
    )
    .await;

    let wrong_password = json!({"email": email, "password": "wrong-password"});
    let unknown_email = json!({"email": generate_unique_email(), "password": "secret123"});
    let malformed_email = json!({"email": "not-an-email", "password": "secret123"});

    // Warm-up: the first unknown-account login computes the shared hash.
    app.post("/login", None, unknown_email.clone()).await;

    let baseline = fastest_login(&app, wrong_password).await;
    for payload in [unknown_email, malformed_email] {
        let elapsed = fastest_login(&app, payload).await;
        assert!(
            elapsed * 4 >= baseline,
            "unknown account took {:?}, wrong password took {:?}",
            elapsed,
            baseline
        );
    }
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/login", None, json!({"email": "someone@test.com"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[tokio::test]
async fn test_registered_student_can_log_in() {
    let app = TestApp::new();
    let email = generate_unique_email();

    app.post(
        "/register",
        None,
        json!({"name": "Ravi", "email": email, "password": "secret123"}),
    )
    .await;

    let (status, body) = app
        .post("/login", None, json!({"email": email, "password": "secret123"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["name"], "Ravi");
}
