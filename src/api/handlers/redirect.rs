//! Handler for short code resolution.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::dto::resolve::OriginalUrlResponse;
use crate::config::ResolveMode;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// - `RESOLVE_MODE=redirect`: 307 Temporary Redirect to
///   `<REDIRECT_SCHEME>://<original_url>`
/// - `RESOLVE_MODE=json`: 200 with `{"original_url": "example.com/x"}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is malformed or unknown.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let record = state.url_service.resolve(&code).await?;

    match state.resolve.mode {
        ResolveMode::Redirect => {
            let target = format!("{}://{}", state.resolve.redirect_scheme, record.original_url);
            debug!("Redirecting {} -> {}", code, target);
            Ok(Redirect::temporary(&target).into_response())
        }
        ResolveMode::Json => Ok(Json(OriginalUrlResponse {
            original_url: record.original_url,
        })
        .into_response()),
    }
}
