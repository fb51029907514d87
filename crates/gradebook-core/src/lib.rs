//! # Gradebook Core
//!
//! Core types, errors, and utilities for the Gradebook API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Lenient limit/offset pagination for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: The `{message, data}` success envelope
//!
//! # Example
//!
//! ```ignore
//! use gradebook_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secret123")?;
//! assert!(verify_password("secret123", &hash));
//!
//! let error = AppError::forbidden("Course not found or you don't have access");
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{
    DEFAULT_PASSWORD_COST, dummy_hash, hash_password, hash_password_with_cost, verify_password,
};
pub use response::{ApiResponse, success};
