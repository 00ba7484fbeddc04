//! Request authentication gate, independent of the web framework.

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::ports::AuthServicePort;

const BEARER_SCHEME: &str = "Bearer";

/// Pick the session token out of the transport.
///
/// The `Authorization` header wins over the cookie. An empty header counts
/// as absent. A non-empty header must be exactly `Bearer <token>`.
///
/// # Errors
/// * `MalformedAuthorizationHeader` - Header present but not a bearer token
/// * `MissingToken` - Neither header nor cookie carries a token
pub fn extract_token(
    authorization: Option<&str>,
    cookie: Option<&str>,
) -> Result<String, AuthError> {
    if let Some(header) = authorization.filter(|h| !h.is_empty()) {
        let parts: Vec<&str> = header.split(' ').collect();
        return match parts.as_slice() {
            [scheme, token] if *scheme == BEARER_SCHEME => Ok((*token).to_string()),
            _ => {
                tracing::info!("Malformed Authorization header");
                Err(AuthError::MalformedAuthorizationHeader)
            }
        };
    }

    match cookie.filter(|c| !c.is_empty()) {
        Some(token) => Ok(token.to_string()),
        None => Err(AuthError::MissingToken),
    }
}

/// Authenticate a token and derive the identity it carries.
///
/// # Errors
/// * `TokenInvalid` - Token fails verification
pub async fn authenticate(
    token: &str,
    auth_service: &dyn AuthServicePort,
) -> Result<Identity, AuthError> {
    auth_service.is_authenticated(token).await?;
    let user_id = auth_service.authenticated_user_id(token).await?;

    Ok(Identity { user_id })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::models::LoginResponse;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestAuthService {}

        #[async_trait]
        impl AuthServicePort for TestAuthService {
            async fn register(&self, body: &[u8]) -> Result<LoginResponse, AuthError>;
            async fn login(&self, body: &[u8]) -> Result<LoginResponse, AuthError>;
            async fn logout(&self, token: &str);
            async fn is_authenticated(&self, token: &str) -> Result<(), AuthError>;
            async fn is_authorized(&self, token: &str, resource: &str) -> Result<(), AuthError>;
            async fn current_user(&self, token: &str) -> Result<User, AuthError>;
            async fn authenticated_user_id(&self, token: &str) -> Result<UserId, AuthError>;
        }
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let token = extract_token(Some("Bearer header-token"), Some("cookie-token")).unwrap();
        assert_eq!(token, "header-token");
    }

    #[test]
    fn test_cookie_used_without_header() {
        assert_eq!(
            extract_token(None, Some("cookie-token")),
            Ok("cookie-token".to_string())
        );
        assert_eq!(
            extract_token(Some(""), Some("cookie-token")),
            Ok("cookie-token".to_string())
        );
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(extract_token(None, None), Err(AuthError::MissingToken));
        assert_eq!(extract_token(Some(""), Some("")), Err(AuthError::MissingToken));
    }

    #[test]
    fn test_wrong_scheme_is_distinct_from_missing() {
        let wrong_scheme = extract_token(Some("Token abc"), None).unwrap_err();
        let missing = extract_token(None, None).unwrap_err();

        assert_eq!(wrong_scheme, AuthError::MalformedAuthorizationHeader);
        assert_ne!(wrong_scheme, missing);
    }

    #[test]
    fn test_malformed_header_does_not_fall_back_to_cookie() {
        for header in ["Bearer", "Bearer a b", "bearer abc", "Bearer  abc"] {
            assert_eq!(
                extract_token(Some(header), Some("cookie-token")),
                Err(AuthError::MalformedAuthorizationHeader),
                "header {:?}",
                header
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_attaches_identity() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_authenticated()
            .with(eq("good-token"))
            .times(1)
            .returning(|_| Ok(()));
        service
            .expect_authenticated_user_id()
            .with(eq("good-token"))
            .times(1)
            .returning(|_| Ok(UserId(11)));

        let identity = authenticate("good-token", &service).await.unwrap();
        assert_eq!(identity.user_id, UserId(11));
    }

    #[tokio::test]
    async fn test_authenticate_short_circuits_on_invalid_token() {
        let mut service = MockTestAuthService::new();
        service
            .expect_is_authenticated()
            .times(1)
            .returning(|_| Err(AuthError::TokenInvalid(auth::JwtError::TokenExpired)));
        service.expect_authenticated_user_id().times(0);

        let result = authenticate("stale-token", &service).await;
        assert_eq!(
            result,
            Err(AuthError::TokenInvalid(auth::JwtError::TokenExpired))
        );
    }
}
