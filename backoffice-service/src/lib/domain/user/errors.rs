use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Failures reported by the storage collaborator.
///
/// "No such record" is not an error at this level: lookups return `None`
/// and updates report `NotFound`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Errors of the profile operations on an authenticated user's own record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid Input")]
    InvalidInput,

    #[error("No Record Found")]
    NotFound,

    #[error("Internal Server Error")]
    InternalServerError,
}

impl From<ValidationError> for UserError {
    fn from(_: ValidationError) -> Self {
        UserError::InvalidInput
    }
}

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => UserError::NotFound,
            RepositoryError::EmailAlreadyExists(_) => UserError::InvalidInput,
            RepositoryError::DatabaseError(e) => {
                tracing::error!(error = %e, "Storage failure");
                UserError::InternalServerError
            }
        }
    }
}
