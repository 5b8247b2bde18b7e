//! Handler for the shortening endpoint.

use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Request body extractor accepting JSON or an urlencoded form.
///
/// Dispatches on `Content-Type`: `application/x-www-form-urlencoded` is read
/// as a form, everything else as JSON. Rejections surface as
/// [`AppError::Validation`].
pub struct ShortenPayload(pub ShortenRequest);

impl<S> FromRequest<S> for ShortenPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(payload) = Form::<ShortenRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            let Json(payload) = Json::<ShortenRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}

/// Creates (or returns the existing) short code for a URL.
///
/// # Endpoint
///
/// `POST /shorten-url`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://www.example.com/x" }
/// ```
///
/// or `original_url=https%3A%2F%2Fwww.example.com%2Fx` as a form.
///
/// # Response
///
/// ```json
/// {
///   "shortened_url": "HH2tynxpYA",
///   "short_link": "http://localhost:7374/HH2tynxpYA",
///   "original_url": "example.com/x"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body or URL is invalid, 500 if the store
/// fails or the code collides with a different URL.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ShortenPayload(payload): ShortenPayload,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let record = state.url_service.shorten(&payload.original_url).await?;
    let short_link = state.url_service.short_link(&record.short_code);

    Ok(Json(ShortenResponse::new(record, short_link)))
}
