//! User domain models and DTOs.

use crate::ids::UserId;
use crate::roles::Role;
use crate::value_types::Email;
use gradebook_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A user of any role.
///
/// The password hash lives in [`UserCredentials`] and is never part of this
/// type, so nothing that serializes a `User` can leak it.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A user row together with its bcrypt hash, used only by login.
#[derive(FromRow, Debug, Clone)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Insert payload handed to the store once the password has been hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

/// DTO for an admin creating a teacher or student account.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub email: Email,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Either `teacher` or `student`.
    pub role: Role,
}

/// Compact user view embedded in other resources.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub items: Vec<User>,
    pub meta: PaginationMeta,
}
