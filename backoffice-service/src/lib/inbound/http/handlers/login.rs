use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::session_cookie;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::LoginResponse;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, ApiSuccess<LoginResponse>), ApiError> {
    let session = state.auth_service.login(&body).await?;
    let cookie = session_cookie(&session)?;

    Ok((jar.add(cookie), ApiSuccess::new(StatusCode::OK, session)))
}
