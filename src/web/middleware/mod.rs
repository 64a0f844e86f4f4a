//! # Web API Middleware
//!
//! Middleware stack for the web API: actor resolution (authentication),
//! request ids, CORS, timeouts, and request tracing.

pub mod auth;
pub mod request_id;

use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::middleware;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::web::state::AppState;

/// Apply the shared middleware stack for a router with app state.
///
/// Order (outermost first): request id, timeout, CORS, tracing. Actor
/// resolution is applied separately in the router builder because it needs
/// the application state.
pub fn apply_middleware_stack(
    router: Router<AppState>,
    request_timeout: Duration,
) -> Router<AppState> {
    router
        // Request ID generation (outermost)
        .layer(middleware::from_fn(request_id::add_request_id))
        // Request timeout
        .layer(TimeoutLayer::new(request_timeout))
        // CORS handling
        .layer(create_cors_layer())
        // Request tracing; request_id is recorded by the request-id middleware
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

/// Create CORS layer with appropriate settings
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
