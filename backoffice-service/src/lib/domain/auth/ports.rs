use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginResponse;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for session operations.
///
/// Implementations hold no per-request state; every call stands alone.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Create a customer account and open a session for it.
    ///
    /// # Arguments
    /// * `body` - Raw JSON `{first_name, last_name, email, password, confirm_password}`
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed body, confirmation mismatch or email taken
    /// * `InternalServerError` - Hashing, signing or storage failed
    async fn register(&self, body: &[u8]) -> Result<LoginResponse, AuthError>;

    /// Open a session for existing credentials.
    ///
    /// # Arguments
    /// * `body` - Raw JSON `{username, password}`
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed body
    /// * `Unauthorized` - Unknown email or wrong password, indistinguishably
    /// * `InternalServerError` - Storage or signing failed
    async fn login(&self, body: &[u8]) -> Result<LoginResponse, AuthError>;

    /// Record the end of a session. Never fails.
    async fn logout(&self, token: &str);

    /// Check a session token.
    ///
    /// # Errors
    /// * `TokenInvalid` - Signature, structure or expiry check failed
    async fn is_authenticated(&self, token: &str) -> Result<(), AuthError>;

    /// Check a session token against a resource.
    ///
    /// Only authentication is checked; resources carry no permissions yet.
    ///
    /// # Errors
    /// * `TokenInvalid` - Signature, structure or expiry check failed
    async fn is_authorized(&self, token: &str, resource: &str) -> Result<(), AuthError>;

    /// Load the record of the session's user.
    ///
    /// # Errors
    /// * `InternalServerError` - Any failure, including unknown users
    async fn current_user(&self, token: &str) -> Result<User, AuthError>;

    /// Derive the user id from an already-checked session token.
    ///
    /// # Errors
    /// * `TokenInvalid` - Token does not verify or issuer is not a user id
    async fn authenticated_user_id(&self, token: &str) -> Result<UserId, AuthError>;
}
