//! # Gradebook Auth
//!
//! Stateless session tokens for the Gradebook API.
//!
//! - [`claims`]: the identity and role carried by a token
//! - [`jwt`]: issuing and validating HS256 tokens
//!
//! # Example
//!
//! ```ignore
//! use gradebook_auth::{issue_token, validate_token};
//! use gradebook_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(user.id, user.role, &config)?;
//! let claims = validate_token(&token, &config)?;
//! assert_eq!(claims.sub, user.id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{encode_claims, issue_token, validate_token};
