use axum::http::Method;
use axum::http::Uri;

use super::ApiError;
use crate::domain::auth::errors::AuthError;

/// Answers every route the service does not provide.
pub async fn not_implemented(method: Method, uri: Uri) -> ApiError {
    tracing::debug!(method = %method, uri = %uri, "Route not implemented");
    ApiError::from(AuthError::NotImplemented)
}
