use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::validation::ChangeEmailRequest;
use crate::domain::validation::ChangePasswordRequest;
use crate::domain::validation::CredentialValidator;
use crate::domain::validation::UpdateUserInfoRequest;
use crate::user::errors::UserError;
use crate::user::ports::ProfileServicePort;
use crate::user::ports::UserRepository;

/// Domain service for an authenticated user's own record.
pub struct ProfileService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<auth::Authenticator>,
    validator: CredentialValidator,
}

impl<UR> ProfileService<UR>
where
    UR: UserRepository,
{
    /// Create a new profile service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing
    pub fn new(repository: Arc<UR>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            validator: CredentialValidator::new(),
        }
    }
}

#[async_trait]
impl<UR> ProfileServicePort for ProfileService<UR>
where
    UR: UserRepository,
{
    async fn update_user_info(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError> {
        let request: UpdateUserInfoRequest = self.validator.parse(body)?;

        let user = self
            .repository
            .update_info(
                user_id,
                &request.first_name,
                &request.last_name,
                acting_user_id,
            )
            .await?;

        tracing::info!(user_id = %user.id, "User info updated");
        Ok(user)
    }

    async fn update_user_password(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError> {
        let request: ChangePasswordRequest = self.validator.parse(body)?;

        if request.password != request.confirm_password {
            tracing::info!(user_id = %user_id, "Password confirmation does not match");
            return Err(UserError::InvalidInput);
        }

        let hashed_password = self
            .authenticator
            .hash_password(&request.password)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                UserError::InternalServerError
            })?;

        let user = self
            .repository
            .update_password(user_id, &hashed_password, acting_user_id)
            .await?;

        tracing::info!(user_id = %user.id, "User password updated");
        Ok(user)
    }

    async fn update_user_email(
        &self,
        user_id: UserId,
        body: &[u8],
        acting_user_id: UserId,
    ) -> Result<User, UserError> {
        let request: ChangeEmailRequest = self.validator.parse(body)?;

        if request.email != request.confirm_email {
            tracing::info!(user_id = %user_id, "Email confirmation does not match");
            return Err(UserError::InvalidInput);
        }

        let user = self
            .repository
            .update_email(user_id, &request.email, acting_user_id)
            .await?;

        tracing::info!(user_id = %user.id, "User email updated");
        Ok(user)
    }
}
