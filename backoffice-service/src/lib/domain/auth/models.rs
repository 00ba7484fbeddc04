use serde::Serialize;

use crate::domain::user::models::UserId;

/// Session issued by register and login.
///
/// Returned in the body and mirrored into the `jwt` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub jwt: String,
    pub expire_at: i64,
}

impl From<auth::IssuedToken> for LoginResponse {
    fn from(issued: auth::IssuedToken) -> Self {
        Self {
            jwt: issued.token,
            expire_at: issued.expires_at,
        }
    }
}

/// Identity established by the request gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
}
