use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

// Each profile route acts on the session's own record, as that same user.

pub async fn update_user_info(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .profile_service
        .update_user_info(session.user_id, &body, session.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn update_user_password(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .profile_service
        .update_user_password(session.user_id, &body, session.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

pub async fn update_user_email(
    State(state): State<AppState>,
    Extension(session): Extension<AuthenticatedUser>,
    body: Bytes,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .profile_service
        .update_user_email(session.user_id, &body, session.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
