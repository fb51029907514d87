//! Feature modules. Each has a `controller` (HTTP handlers), a `service`
//! (business rules against the store) and a `router`.

pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod health;
pub mod users;
