//! Router assembly
//!
//! [`build_app`] is the single place where routes, state and the middleware
//! stack come together; the HTTP server and the integration tests both use it.

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api;
use crate::auth::require_auth;
use crate::core::ServerState;

pub mod logging;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(api::health::router())
        // Auth: login is public, the rest needs a token
        .merge(api::auth::router())
        // Catalog & staff
        .merge(api::products::router())
        .merge(api::users::router())
        // Order taking
        .merge(api::cart::router())
        .merge(api::orders::router())
}

/// Fully configured application with state and middleware applied
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        // JWT authentication - injects CurrentUser, skips public routes
        .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                // Request ID - generate before anything logs
                .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(logging::logging_middleware))
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout)),
        )
}
