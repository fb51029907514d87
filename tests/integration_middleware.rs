mod common;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::TestApp;
use gradebook_auth::{Claims, encode_claims};
use gradebook_config::JwtConfig;
use gradebook_models::Role;
use serde_json::json;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

async fn get_with_header(app: &TestApp, uri: &str, authorization: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    app.send(request).await
}

#[tokio::test]
async fn test_missing_header() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/student/gpa", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Authorization header is required"}));
}

#[tokio::test]
async fn test_malformed_header() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student).await;

    for value in [
        format!("Token {}", token),
        format!("bearer {}", token),
        "Bearer".to_string(),
        format!("Bearer {} extra", token),
        format!("Bearer  {}", token),
    ] {
        let (status, body) = get_with_header(&app, "/api/student/gpa", &value).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", value);
        assert_eq!(body["error"], "Invalid authorization header format");
    }
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/student/gpa", Some("not.a.jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::new();
    let student = app.create_user(Role::Student).await;

    let claims = Claims::new(student.id, Role::Student, now() - 7200, 3600);
    let token = encode_claims(&claims, &app.jwt_config).unwrap();

    let (status, body) = app.get("/api/student/gpa", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = TestApp::new();
    let student = app.create_user(Role::Student).await;

    let claims = Claims::new(student.id, Role::Student, now(), 3600);
    let token = encode_claims(&claims, &JwtConfig::new("some-other-secret")).unwrap();

    let (status, body) = app.get("/api/student/gpa", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_forged_role_is_rejected() {
    let app = TestApp::new();
    let student = app.create_user(Role::Student).await;

    // Re-sign a student's identity as admin with a key the server doesn't hold.
    let claims = Claims::new(student.id, Role::Admin, now(), 3600);
    let token = encode_claims(&claims, &JwtConfig::new("attacker-key")).unwrap();

    let (status, _) = app.get("/api/admin/students", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unauthenticated_request_never_reaches_role_check() {
    let app = TestApp::new();

    for uri in ["/api/admin/students", "/api/teacher/courses", "/api/student/grades"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["error"], "Authorization header is required");
    }
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin).await;
    let (_, teacher) = app.signed_in(Role::Teacher).await;
    let (_, student) = app.signed_in(Role::Student).await;

    let cases = [
        ("/api/admin/students", &teacher),
        ("/api/admin/courses", &student),
        ("/api/teacher/courses", &admin),
        ("/api/teacher/courses", &student),
        ("/api/student/gpa", &admin),
        ("/api/student/grades", &teacher),
    ];

    for (uri, token) in cases {
        let (status, body) = app.get(uri, Some(token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body, json!({"error": "Forbidden: insufficient permissions"}));
    }
}

#[tokio::test]
async fn test_matching_role_passes() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin).await;
    let (_, teacher) = app.signed_in(Role::Teacher).await;
    let (_, student) = app.signed_in(Role::Student).await;

    assert_eq!(app.get("/api/admin/students", Some(&admin)).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/teacher/courses", Some(&teacher)).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/student/gpa", Some(&student)).await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new();

    assert_eq!(app.get("/health", None).await.0, StatusCode::OK);
    assert_eq!(app.get("/api-docs/openapi.json", None).await.0, StatusCode::OK);
}
