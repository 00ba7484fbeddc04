use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::not_implemented::not_implemented;
use super::handlers::register::register;
use super::handlers::update_user::update_user_email;
use super::handlers::update_user::update_user_info;
use super::handlers::update_user::update_user_password;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::ports::ProfileServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    profile_service: Arc<dyn ProfileServicePort>,
) -> Router {
    let state = AppState {
        auth_service,
        profile_service,
    };

    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/login", put(login).post(login))
        .route("/api/logout", post(logout));

    let protected_routes = Router::new()
        .route("/api/user", get(current_user))
        .route("/api/users/info", put(update_user_info))
        .route("/api/users/password", put(update_user_password))
        .route("/api/users/email", put(update_user_email))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span; they carry session tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_implemented)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
