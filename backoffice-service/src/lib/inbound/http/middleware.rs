use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use super::handlers::ApiError;
use super::handlers::SESSION_COOKIE;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::gate;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated session in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub token: String,
}

/// Middleware that runs the authentication gate and attaches the session
/// to request extensions, short-circuiting with the gate's error.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::info!("Authorization header is not valid text");
            ApiError::from(AuthError::MalformedAuthorizationHeader).into_response()
        })?),
        None => None,
    };
    let cookie = jar.get(SESSION_COOKIE).map(|c| c.value());

    let token = gate::extract_token(authorization, cookie)
        .map_err(|e| ApiError::from(e).into_response())?;

    let identity = gate::authenticate(&token, state.auth_service.as_ref())
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: identity.user_id,
        token,
    });

    Ok(next.run(req).await)
}
