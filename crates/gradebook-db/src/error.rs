//! Store error type.

use gradebook_core::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique index or constraint rejected the write.
    #[error("unique constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    /// A referenced row does not exist.
    #[error("foreign key constraint violated: {}", constraint.as_deref().unwrap_or("unknown"))]
    ForeignKeyViolation { constraint: Option<String> },

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn unique(constraint: impl Into<String>) -> Self {
        Self::UniqueViolation {
            constraint: Some(constraint.into()),
        }
    }

    pub fn foreign_key(constraint: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            constraint: Some(constraint.into()),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().map(str::to_string);
            if db_err.is_unique_violation() {
                return Self::UniqueViolation { constraint };
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation { constraint };
            }
        }
        Self::Database(err)
    }
}

/// Fallback mapping for store failures a service did not translate itself.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { .. } => AppError::conflict("Resource already exists"),
            StoreError::ForeignKeyViolation { .. } => {
                AppError::bad_request("Referenced resource does not exist")
            }
            StoreError::Database(_) => AppError::internal(err),
        }
    }
}
