//! HTTP application assembly: routes plus the tower-http layers around them.
//!
//! `main.rs` and the integration tests both call [`build_app_router`], so the
//! tests exercise the production middleware.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::handlers::auth::{ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER};
use crate::routes;
use crate::state::AppState;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Storefront router: `/health` at the root, everything else under `/api/v1`.
///
/// Outermost layer first, a request passes through CORS, gets an
/// `x-request-id`, is traced, has the id copied onto its response, and is
/// bounded by the request timeout. Panics in handlers become 500s.
///
/// A timed-out handler future is dropped, which rolls back any transaction
/// it had open.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.request_timeout_secs),
    );
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(timeout)
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(trace)
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(storefront_cors(config))
        .with_state(state)
}

/// CORS for the storefront frontend.
///
/// Login and refresh hand tokens back in custom headers, so those are exposed
/// to browser scripts.
pub fn storefront_cors(config: &ServerConfig) -> CorsLayer {
    // Origins were checked by `ServerConfig::from_env`.
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .expose_headers([ACCESS_TOKEN_HEADER, REFRESH_TOKEN_HEADER])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
