//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten-url` - Shorten a URL (rate limited)
//! - `GET  /{code}`      - Resolve a short code (rate limited)
//! - `GET  /health`      - Health check: DB and cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the public routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter for the public routes; `None` disables
///   limiting (the limiter needs `ConnectInfo`, which in-process test
///   servers do not provide)
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    let public = match rate_limit {
        Some(limiter) => api::routes::public_routes().layer(limiter),
        None => api::routes::public_routes(),
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
