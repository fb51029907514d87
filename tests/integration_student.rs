mod common;

use axum::http::StatusCode;
use common::TestApp;
use gradebook_db::GradeRepository;
use gradebook_models::{GradeUpsert, Role};
use serde_json::json;

#[tokio::test]
async fn test_student_courses_are_own_enrollments() {
    let app = TestApp::new();
    let teacher = app.create_user(Role::Teacher).await;
    let (student, token) = app.signed_in(Role::Student).await;
    let classmate = app.create_user(Role::Student).await;

    let enrolled = app.create_course(&teacher).await;
    let not_enrolled = app.create_course(&teacher).await;
    app.enroll(&student, &enrolled).await;
    app.enroll(&classmate, &not_enrolled).await;

    let (status, body) = app.get("/api/student/courses", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Courses retrieved successfully");
    let courses = body["data"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["id"], enrolled.id.to_string());
}

#[tokio::test]
async fn test_student_grades_embed_course() {
    let app = TestApp::new();
    let teacher = app.create_user(Role::Teacher).await;
    let (student, token) = app.signed_in(Role::Student).await;
    let course = app.create_course(&teacher).await;
    app.enroll(&student, &course).await;
    app.store
        .upsert_grade(GradeUpsert::new(student.id, course.id, 85.5))
        .await
        .unwrap();

    let (status, body) = app.get("/api/student/grades", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let grades = body["data"].as_array().unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0]["marks"], 85.5);
    assert_eq!(grades[0]["grade_letter"], "B");
    assert_eq!(
        grades[0]["course"],
        json!({"id": course.id.to_string(), "name": course.name})
    );
}

#[tokio::test]
async fn test_student_sees_only_own_grades() {
    let app = TestApp::new();
    let teacher = app.create_user(Role::Teacher).await;
    let (student, token) = app.signed_in(Role::Student).await;
    let classmate = app.create_user(Role::Student).await;
    let course = app.create_course(&teacher).await;
    app.enroll(&student, &course).await;
    app.enroll(&classmate, &course).await;
    app.store
        .upsert_grade(GradeUpsert::new(classmate.id, course.id, 99.0))
        .await
        .unwrap();

    let (_, body) = app.get("/api/student/grades", Some(&token)).await;
    assert_eq!(body["data"], json!([]));

    let (_, body) = app.get("/api/student/gpa", Some(&token)).await;
    assert_eq!(body["data"]["gpa"], 0.0);
}

#[tokio::test]
async fn test_gpa_without_grades() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Student).await;

    let (status, body) = app.get("/api/student/gpa", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "No grades available to calculate GPA", "data": {"gpa": 0.0}})
    );
}

#[tokio::test]
async fn test_gpa_over_a_b_c() {
    let app = TestApp::new();
    let teacher = app.create_user(Role::Teacher).await;
    let (student, token) = app.signed_in(Role::Student).await;

    for marks in [92.0, 85.0, 71.0] {
        let course = app.create_course(&teacher).await;
        app.enroll(&student, &course).await;
        app.store
            .upsert_grade(GradeUpsert::new(student.id, course.id, marks))
            .await
            .unwrap();
    }

    let (status, body) = app.get("/api/student/gpa", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "GPA calculated successfully");
    assert_eq!(body["data"], json!({"gpa": 3.0, "courses_count": 3}));
}

#[tokio::test]
async fn test_full_flow_through_http() {
    let app = TestApp::new();
    let (_, admin) = app.signed_in(Role::Admin).await;

    let (_, teacher) = app
        .post(
            "/api/admin/users",
            Some(&admin),
            json!({"name": "Prof", "email": "prof@uni.edu", "password": "teach123", "role": "teacher"}),
        )
        .await;
    let teacher_id = teacher["data"]["id"].clone();

    let (_, student) = app
        .post(
            "/register",
            None,
            json!({"name": "Kid", "email": "kid@uni.edu", "password": "study123"}),
        )
        .await;
    let student_id = student["data"]["id"].clone();

    let (_, course) = app
        .post(
            "/api/admin/courses",
            Some(&admin),
            json!({"name": "Compilers", "teacher_id": teacher_id}),
        )
        .await;
    let course_id = course["data"]["id"].clone();

    let (_, login) = app
        .post("/login", None, json!({"email": "prof@uni.edu", "password": "teach123"}))
        .await;
    let teacher_token = login["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = app
        .post(
            "/api/teacher/enrollments",
            Some(&teacher_token),
            json!({"student_id": student_id, "course_id": course_id}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/teacher/grades",
            Some(&teacher_token),
            json!({"student_id": student_id, "course_id": course_id, "marks": 88}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, login) = app
        .post("/login", None, json!({"email": "kid@uni.edu", "password": "study123"}))
        .await;
    let student_token = login["data"]["token"].as_str().unwrap().to_string();

    let (_, body) = app.get("/api/student/grades", Some(&student_token)).await;
    assert_eq!(body["data"][0]["course"]["name"], "Compilers");
    assert_eq!(body["data"][0]["grade_letter"], "B");

    let (_, body) = app.get("/api/student/gpa", Some(&student_token)).await;
    assert_eq!(body["data"], json!({"gpa": 3.0, "courses_count": 1}));
}
