//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tokio::time::timeout;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::repositories::UrlRepository;
use crate::state::AppState;

/// Reports whether the store and the cache are reachable.
///
/// `GET /health` answers 200 when both checks pass and 503 otherwise. The
/// service keeps serving with the cache down, so a degraded cache is a
/// signal for operators rather than an outage.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 42 records" },
///     "cache": { "status": "ok", "message": "Cache reachable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let cache_check = check_cache(&state).await;

    let all_healthy = db_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting stored records.
async fn check_database(state: &AppState) -> CheckStatus {
    let limit = state.url_service.settings().store_timeout;

    match timeout(limit, state.url_service.repository().count()).await {
        Ok(Ok(count)) => CheckStatus::ok(format!("Connected, {} records", count)),
        Ok(Err(e)) => CheckStatus::error(format!("Database error: {}", e)),
        Err(_) => CheckStatus::error(format!(
            "Database timed out after {}ms",
            limit.as_millis()
        )),
    }
}

/// Checks cache connectivity via the backend's own health check.
async fn check_cache(state: &AppState) -> CheckStatus {
    let limit = state.url_service.settings().cache_timeout;

    match timeout(limit, state.url_service.cache().health_check()).await {
        Ok(true) => CheckStatus::ok("Cache reachable"),
        Ok(false) => CheckStatus::error("Cache connection failed"),
        Err(_) => CheckStatus::error(format!("Cache timed out after {}ms", limit.as_millis())),
    }
}
