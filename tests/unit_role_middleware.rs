use axum::http::StatusCode;
use gradebook::middleware::auth::{AuthUser, parse_bearer};
use gradebook::middleware::role::check_any_role;
use gradebook_auth::Claims;
use gradebook_models::{Role, UserId};

fn create_test_auth_user(role: Role) -> AuthUser {
    AuthUser::from(Claims::new(UserId::new(), role, 1_234_567_890, 3600))
}

#[test]
fn test_check_any_role_exact_match() {
    for role in Role::ALL {
        let auth_user = create_test_auth_user(role);
        assert_eq!(check_any_role(Some(&auth_user), &[role]).unwrap(), auth_user);
    }
}

#[test]
fn test_check_any_role_no_match() {
    let cases = [
        (Role::Student, Role::Admin),
        (Role::Teacher, Role::Admin),
        (Role::Admin, Role::Teacher),
        (Role::Student, Role::Teacher),
        (Role::Admin, Role::Student),
        (Role::Teacher, Role::Student),
    ];

    for (held, required) in cases {
        let auth_user = create_test_auth_user(held);
        let err = check_any_role(Some(&auth_user), &[required]).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}

#[test]
fn test_check_any_role_multiple_allowed() {
    let allowed = [Role::Admin, Role::Teacher];

    assert!(check_any_role(Some(&create_test_auth_user(Role::Admin)), &allowed).is_ok());
    assert!(check_any_role(Some(&create_test_auth_user(Role::Teacher)), &allowed).is_ok());
    assert!(check_any_role(Some(&create_test_auth_user(Role::Student)), &allowed).is_err());
}

#[test]
fn test_check_any_role_empty_list() {
    let auth_user = create_test_auth_user(Role::Admin);
    assert!(check_any_role(Some(&auth_user), &[]).is_err());
}

#[test]
fn test_check_any_role_without_auth_user() {
    let err = check_any_role(None, &[Role::Admin]).unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.public_message(), "Unauthorized access");
}

#[test]
fn test_auth_user_from_claims() {
    let user_id = UserId::new();
    let auth_user = AuthUser::from(Claims::new(user_id, Role::Teacher, 0, 60));
    assert_eq!(auth_user.user_id, user_id);
    assert_eq!(auth_user.role, Role::Teacher);
}

#[test]
fn test_parse_bearer() {
    assert_eq!(parse_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");

    let missing = parse_bearer(None).unwrap_err();
    assert_eq!(missing.public_message(), "Authorization header is required");

    for value in ["Basic abc", "Bearer", "Bearer a b", "bearer abc", ""] {
        let err = parse_bearer(Some(value)).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Invalid authorization header format");
    }
}
