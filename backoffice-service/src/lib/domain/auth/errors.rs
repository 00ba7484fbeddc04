use thiserror::Error;

use crate::domain::validation::ValidationError;
use crate::user::errors::RepositoryError;

/// Failures of the authentication flows and the request gate.
///
/// Messages are the client-facing names; detail goes to the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid Input")]
    InvalidInput,

    #[error("Permission Denied")]
    Unauthorized,

    #[error("Invalid Token")]
    TokenInvalid(#[from] auth::JwtError),

    #[error("Permission Denied")]
    MissingToken,

    #[error("Bad Request")]
    MalformedAuthorizationHeader,

    #[error("No Record Found")]
    NotFound,

    #[error("Internal Server Error")]
    InternalServerError,

    #[error("Not Implemented")]
    NotImplemented,
}

impl From<ValidationError> for AuthError {
    fn from(_: ValidationError) -> Self {
        AuthError::InvalidInput
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => AuthError::NotFound,
            RepositoryError::EmailAlreadyExists(email) => {
                tracing::info!(email = %email, "Email already registered");
                AuthError::InvalidInput
            }
            RepositoryError::DatabaseError(e) => {
                tracing::error!(error = %e, "Storage failure");
                AuthError::InternalServerError
            }
        }
    }
}
