//! DTO for the shorten endpoint.

use serde::Deserialize;

/// Request body for `POST /api/shorten`.
///
/// The handler only ever passes a parsed string to the core; emptiness is
/// rejected by the service before any side effect.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}
