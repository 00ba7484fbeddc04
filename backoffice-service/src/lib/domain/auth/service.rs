use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginResponse;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::CUSTOMER_ROLE_ID;
use crate::domain::user::models::SYSTEM_USER_ID;
use crate::domain::validation::CredentialValidator;
use crate::domain::validation::LoginRequest;
use crate::domain::validation::RegisterRequest;
use crate::user::ports::UserRepository;

/// Domain service for registration, login and session checks.
///
/// Orchestrates the validator, the storage port and the shared
/// [`auth::Authenticator`].
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<auth::Authenticator>,
    validator: CredentialValidator,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            validator: CredentialValidator::new(),
        }
    }

    fn issue_session(&self, user_id: UserId) -> Result<LoginResponse, AuthError> {
        self.authenticator
            .issue_token(&user_id.to_string())
            .map(LoginResponse::from)
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Token signing failed");
                AuthError::InternalServerError
            })
    }

    fn verify_issuer(&self, token: &str) -> Result<String, AuthError> {
        self.authenticator
            .verify_and_extract_issuer(token)
            .map_err(|e| {
                tracing::info!(error = %e, "Session token rejected");
                AuthError::TokenInvalid(e)
            })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, body: &[u8]) -> Result<LoginResponse, AuthError> {
        let request: RegisterRequest = self.validator.parse(body)?;

        if request.password != request.confirm_password {
            tracing::info!("Registration password confirmation does not match");
            return Err(AuthError::InvalidInput);
        }

        let hashed_password = self
            .authenticator
            .hash_password(&request.password)
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                AuthError::InternalServerError
            })?;

        let user = self
            .repository
            .create(NewUser {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                hashed_password,
                role_id: CUSTOMER_ROLE_ID,
                created_by: SYSTEM_USER_ID,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        // A signing failure here leaves the record in place.
        self.issue_session(user.id)
    }

    async fn login(&self, body: &[u8]) -> Result<LoginResponse, AuthError> {
        let request: LoginRequest = self.validator.parse(body)?;

        let Some(user) = self.repository.find_by_email(&request.username).await? else {
            self.authenticator.reject_unknown(&request.password);
            tracing::info!("Login failed");
            return Err(AuthError::Unauthorized);
        };

        let issued = self
            .authenticator
            .authenticate(&request.password, &user.hashed_password, &user.id.to_string())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::info!("Login failed");
                    AuthError::Unauthorized
                }
                AuthenticationError::PasswordError(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                    AuthError::InternalServerError
                }
                AuthenticationError::JwtError(e) => {
                    tracing::error!(user_id = %user.id, error = %e, "Token signing failed");
                    AuthError::InternalServerError
                }
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginResponse::from(issued))
    }

    async fn logout(&self, token: &str) {
        match self.authenticator.verify_and_extract_issuer(token) {
            Ok(issuer) => tracing::info!(user_id = %issuer, "User logged out"),
            Err(e) => tracing::info!(error = %e, "Logout without a valid session"),
        }
    }

    async fn is_authenticated(&self, token: &str) -> Result<(), AuthError> {
        self.verify_issuer(token).map(|_| ())
    }

    async fn is_authorized(&self, token: &str, resource: &str) -> Result<(), AuthError> {
        self.is_authenticated(token).await?;
        tracing::debug!(resource = %resource, "Authorization granted without permission check");
        Ok(())
    }

    async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let issuer = self
            .verify_issuer(token)
            .map_err(|_| AuthError::InternalServerError)?;

        let user_id = UserId::from_string(&issuer).map_err(|e| {
            tracing::error!(error = %e, "Session issuer is not a user id");
            AuthError::InternalServerError
        })?;

        match self.repository.find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                tracing::error!(user_id = %user_id, "Session user does not exist");
                Err(AuthError::InternalServerError)
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Unable to load session user");
                Err(AuthError::InternalServerError)
            }
        }
    }

    async fn authenticated_user_id(&self, token: &str) -> Result<UserId, AuthError> {
        let issuer = self.verify_issuer(token)?;

        UserId::from_string(&issuer).map_err(|e| {
            tracing::warn!(error = %e, "Session issuer is not a user id");
            AuthError::TokenInvalid(auth::JwtError::Malformed(e.to_string()))
        })
    }
}
