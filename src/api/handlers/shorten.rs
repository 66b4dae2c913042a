//! Handler for link shortening.

use axum::{Json, extract::State};

use crate::api::dto::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `200 OK` with the allocated code as a plain string body.
///
/// # Errors
///
/// - 400 Bad Request for an empty URL
/// - 503 Service Unavailable on allocator contention or store failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<String, AppError> {
    state.shortener.create(&payload.url).await
}
