//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public routes, subject to per-IP rate limiting.
///
/// # Endpoints
///
/// - `POST /shorten-url` - Create or fetch the short code for a URL
/// - `GET  /{code}`      - Resolve a short code (redirect or JSON)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten-url", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
}
