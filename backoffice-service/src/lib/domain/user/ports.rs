use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::RepositoryError;
use crate::user::errors::UserError;

/// Port for operations an authenticated user performs on their own record.
#[async_trait]
pub trait ProfileServicePort: Send + Sync + 'static {
    /// Replace first and last name.
    ///
    /// # Arguments
    /// * `user_id` - Record to update
    /// * `body` - Raw JSON `{first_name, last_name}`
    /// * `acting_user_id` - User performing the change (audit)
    ///
    /// # Errors
    /// * `InvalidInput` - Body is malformed or violates field constraints
    /// * `NotFound` - User does not exist
    /// * `InternalServerError` - Storage failed
    async fn update_user_info(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError>;

    /// Replace the password.
    ///
    /// # Arguments
    /// * `user_id` - Record to update
    /// * `body` - Raw JSON `{password, confirm_password}`
    /// * `acting_user_id` - User performing the change (audit)
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed body or confirmation mismatch (nothing written)
    /// * `NotFound` - User does not exist
    /// * `InternalServerError` - Hashing or storage failed
    async fn update_user_password(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError>;

    /// Replace the email address.
    ///
    /// # Arguments
    /// * `user_id` - Record to update
    /// * `body` - Raw JSON `{email, confirm_email}`
    /// * `acting_user_id` - User performing the change (audit)
    ///
    /// # Errors
    /// * `InvalidInput` - Malformed body, confirmation mismatch or email taken
    /// * `NotFound` - User does not exist
    /// * `InternalServerError` - Storage failed
    async fn update_user_email(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError>;
}

/// Persistence operations for user records.
///
/// Lookups only see active (non-deleted) records. Email uniqueness among
/// active records is enforced here, not by callers.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Returns
    /// Created user with its assigned id
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Update first and last name.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_info(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(
        &self,
        id: UserId,
        hashed_password: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError>;

    /// Replace the email address.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - Email belongs to another active user
    /// * `DatabaseError` - Database operation failed
    async fn update_email(
        &self,
        id: UserId,
        email: &str,
        acting_user_id: UserId,
    ) -> Result<User, RepositoryError>;
}
