use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginResponse;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod current_user;
pub mod login;
pub mod logout;
pub mod not_implemented;
pub mod register;
pub mod update_user;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "jwt";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Transport errors. Known kinds answer `{"message": <name>}`; anything
/// else answers a generic 500 and keeps the detail in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    Unauthorized(String),
    NotFound,
    InvalidInput,
    InternalServerError,
    NotImplemented,
    Unexpected(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, name) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "Bad Request".to_string()),
            ApiError::Unauthorized(name) => (StatusCode::UNAUTHORIZED, name),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "No Record Found".to_string()),
            ApiError::InvalidInput => (StatusCode::NOT_ACCEPTABLE, "Invalid Input".to_string()),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
            ApiError::NotImplemented => {
                (StatusCode::NOT_IMPLEMENTED, "Not Implemented".to_string())
            }
            ApiError::Unexpected(detail) => {
                tracing::error!(error = %detail, "Unexpected error");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal Server Error",
                        "message": "An unexpected error has occurred"
                    })),
                )
                    .into_response();
            }
        };

        (status, Json(ApiErrorData { message: name })).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput => ApiError::InvalidInput,
            AuthError::Unauthorized | AuthError::TokenInvalid(_) | AuthError::MissingToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::MalformedAuthorizationHeader => ApiError::BadRequest,
            AuthError::NotFound => ApiError::NotFound,
            AuthError::InternalServerError => ApiError::InternalServerError,
            AuthError::NotImplemented => ApiError::NotImplemented,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidInput => ApiError::InvalidInput,
            UserError::NotFound => ApiError::NotFound,
            UserError::InternalServerError => ApiError::InternalServerError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Outward view of a user record. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: u64,
    pub created_user: u64,
    pub created_at: DateTime<Utc>,
    pub updated_user: Option<u64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_user: Option<u64>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_u64(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role_id: user.role_id.0,
            created_user: user.created_by.as_u64(),
            created_at: user.created_at,
            updated_user: user.updated_by.map(|id| id.as_u64()),
            updated_at: user.updated_at,
            deleted_user: user.deleted_by.map(|id| id.as_u64()),
        }
    }
}

/// `HttpOnly` cookie mirroring an issued session, expiring with it.
pub(crate) fn session_cookie(session: &LoginResponse) -> Result<Cookie<'static>, ApiError> {
    let expires = time::OffsetDateTime::from_unix_timestamp(session.expire_at)
        .map_err(|e| ApiError::Unexpected(format!("session expiry out of range: {}", e)))?;

    Ok(Cookie::build((SESSION_COOKIE, session.jwt.clone()))
        .http_only(true)
        .path("/")
        .expires(expires)
        .build())
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_auth_errors_map_to_status_and_name() {
        let cases = [
            (AuthError::InvalidInput, StatusCode::NOT_ACCEPTABLE, "Invalid Input"),
            (AuthError::Unauthorized, StatusCode::UNAUTHORIZED, "Permission Denied"),
            (
                AuthError::TokenInvalid(auth::JwtError::TokenExpired),
                StatusCode::UNAUTHORIZED,
                "Invalid Token",
            ),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED, "Permission Denied"),
            (
                AuthError::MalformedAuthorizationHeader,
                StatusCode::BAD_REQUEST,
                "Bad Request",
            ),
            (AuthError::NotFound, StatusCode::NOT_FOUND, "No Record Found"),
            (
                AuthError::InternalServerError,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
            (AuthError::NotImplemented, StatusCode::NOT_IMPLEMENTED, "Not Implemented"),
        ];

        for (err, status, name) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), status);
            assert_eq!(body_json(response).await, json!({ "message": name }));
        }
    }

    #[tokio::test]
    async fn test_unexpected_error_hides_detail() {
        let response =
            ApiError::from(anyhow::anyhow!("connection string leaked")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": "Internal Server Error",
                "message": "An unexpected error has occurred"
            })
        );
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&LoginResponse {
            jwt: "a.b.c".to_string(),
            expire_at: 1_900_000_000,
        })
        .unwrap();

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "a.b.c");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(
            cookie.expires_datetime().map(|t| t.unix_timestamp()),
            Some(1_900_000_000)
        );
    }

    #[test]
    fn test_user_data_omits_hash() {
        let user = User {
            id: crate::user::models::UserId(3),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@x.com".to_string(),
            hashed_password: "$argon2id$secret".to_string(),
            role_id: crate::user::models::RoleId(2),
            created_by: crate::user::models::UserId(1),
            created_at: Utc::now(),
            updated_by: None,
            updated_at: None,
            deleted_by: None,
            deleted_at: None,
        };

        let value = serde_json::to_value(UserData::from(&user)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["created_user"], 1);
        assert!(value.get("hashed_password").is_none());
        assert!(value.get("deleted_at").is_none());
        assert!(!value.to_string().contains("argon2"));
    }
}
