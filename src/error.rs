//! Error types for the inventory seed tool

use thiserror::Error;

use crate::models::Collection;

/// Main application error type
///
/// The operator sees every variant the same way: the failure is logged and
/// the process exits with a non-zero status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unresolved reference to {collection} '{label}'")]
    UnresolvedReference { collection: Collection, label: String },

    #[error("Refused: {0}")]
    Refused(String),

    #[error("Verification failed: {}", .0.join("; "))]
    Verification(Vec<String>),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_reference_message() {
        let err = AppError::UnresolvedReference {
            collection: Collection::Companies,
            label: "acme".to_string(),
        };
        assert_eq!(err.to_string(), "Unresolved reference to companies 'acme'");
    }

    #[test]
    fn test_verification_message_joins_violations() {
        let err = AppError::Verification(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Verification failed: a; b");
    }
}
