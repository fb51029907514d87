//! The closed set of user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::value_types::ValueTypeError;

/// Role of a user, fixed at creation.
///
/// Every route group is gated on exactly one role; there is no hierarchy
/// between them, so an admin cannot use teacher or student endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Whether an admin may hand this role out through the API.
    ///
    /// Admin accounts only come from the CLI or the seeder.
    pub fn is_assignable(&self) -> bool {
        match self {
            Role::Admin => false,
            Role::Teacher | Role::Student => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValueTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(ValueTypeError::UnknownRole(other.to_string())),
        }
    }
}

impl_text_column!(Role);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_and_mixed_case_rejected() {
        assert!("principal".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_only_teacher_and_student_are_assignable() {
        assert!(!Role::Admin.is_assignable());
        assert!(Role::Teacher.is_assignable());
        assert!(Role::Student.is_assignable());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), r#""teacher""#);
        let role: Role = serde_json::from_str(r#""student""#).unwrap();
        assert_eq!(role, Role::Student);
        assert!(serde_json::from_str::<Role>(r#""superuser""#).is_err());
    }
}
