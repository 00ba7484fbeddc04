use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::ApiSuccess;
use super::SESSION_COOKIE;
use crate::domain::auth::gate::extract_token;
use crate::inbound::http::router::AppState;

/// Ends the client's session by expiring the cookie. Always succeeds;
/// tokens stay valid until they expire.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<LogoutResponseData>) {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value());

    let token = extract_token(authorization, cookie).unwrap_or_default();
    state.auth_service.logout(&token).await;

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    (
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LogoutResponseData {
                message: "success".to_string(),
            },
        ),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
