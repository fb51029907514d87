//! Request authentication and role authorization.
//!
//! - [`auth`]: the `authenticate` middleware and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: `require_admin`, `require_teacher`, `require_student`
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `authenticate` validates the token and stores an `AuthUser`
//! 3. The route group's `require_*` layer checks the role
//! 4. The handler extracts `AuthUser` and acts on the caller's id only

pub mod auth;
pub mod role;
