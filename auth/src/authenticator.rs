use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session
/// token handling.
///
/// Holds the single signing secret for the process lifetime; it is read-only
/// and safe to share across requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Authentication operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Shared secret for token signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `candidate` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject_id` - Identity to bind into the token
    ///
    /// # Returns
    /// Issued token with its expiry
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        candidate: &str,
        stored_hash: &str,
        subject_id: &str,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(stored_hash, candidate)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.jwt_handler.issue(subject_id)?)
    }

    /// Reject credentials for a subject that does not exist.
    ///
    /// Runs the same password verification work as `authenticate`, so an
    /// unknown subject costs as much as a wrong password.
    ///
    /// # Returns
    /// `InvalidCredentials`
    pub fn reject_unknown(&self, candidate: &str) -> AuthenticationError {
        self.password_hasher.verify_placeholder(candidate);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    ///
    /// Used right after registration, when the credentials were just set.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject_id: &str) -> Result<IssuedToken, JwtError> {
        self.jwt_handler.issue(subject_id)
    }

    /// Validate a session token and return its issuer claim.
    ///
    /// # Errors
    /// * `JwtError` - Token is expired, forged or malformed
    pub fn verify_and_extract_issuer(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify_and_extract_issuer(token)
    }
}
