use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::check_token::check_token;
use super::handlers::public_key::public_key;
use super::handlers::status::status;
use crate::domain::auth::ports::AuthenticationServicePort;
use crate::domain::auth::ports::TokenValidationServicePort;

#[derive(Clone)]
pub struct AppState {
    pub authentication: Arc<dyn AuthenticationServicePort>,
    pub validation: Arc<dyn TokenValidationServicePort>,
}

/// Build the HTTP application.
///
/// # Arguments
/// * `authentication` - Token issuing service
/// * `validation` - Token checking and key export service
/// * `request_timeout` - Upper bound for handling one request
pub fn create_router(
    authentication: Arc<dyn AuthenticationServicePort>,
    validation: Arc<dyn TokenValidationServicePort>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        authentication,
        validation,
    };

    let auth_routes = Router::new()
        .route("/api/auth/login", post(authenticate))
        .route("/api/auth/check", post(check_token))
        .route("/api/auth/key", get(public_key));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
                request_id = %request_id,
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
        .merge(auth_routes)
        .route("/api/status", get(status))
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::new())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
