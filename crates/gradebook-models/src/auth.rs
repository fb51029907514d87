//! Authentication payloads.

use crate::users::User;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login credentials.
///
/// The email is kept as a raw string: a malformed address must produce the
/// same "Invalid email or password" answer as an unknown one.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Public self-registration. There is no `role` field: any role sent by the
/// client is dropped during deserialization and the account is a student.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: crate::value_types::Email,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_ignores_role_field() {
        let dto: RegisterRequestDto = serde_json::from_value(json!({
            "name": "Mallory",
            "email": "mallory@example.com",
            "password": "secret1",
            "role": "admin"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.email.as_str(), "mallory@example.com");
    }
}
