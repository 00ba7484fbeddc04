use thiserror::Error;

/// Failures of the password hasher.
///
/// A wrong candidate password is not an error; `verify` reports it as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
