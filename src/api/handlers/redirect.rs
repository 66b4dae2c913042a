//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Normalize the code to uppercase and look it up
/// 2. Emit a resolution event to the count worker (fire-and-forget)
/// 3. Return 307 Temporary Redirect
///
/// Unknown codes redirect to the configured fallback URL; a broken link is
/// never a user-visible error. The hit counter update happens asynchronously
/// and is eventually consistent.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.shortener.resolve(&code).await?;
    Ok(Redirect::temporary(&destination))
}
