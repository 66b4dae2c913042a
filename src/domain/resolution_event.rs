//! Resolution event model for asynchronous hit counting.

/// An in-memory representation of a successful code resolution.
///
/// Used to pass the resolved code from the redirect path to the background
/// count worker via a channel. This decouples the redirect response from the
/// counter write, so a redirect is never delayed by metrics bookkeeping.
///
/// # Usage Flow
///
/// 1. Emitted by
///    [`ShortenerService::resolve`](crate::application::services::ShortenerService::resolve)
///    after a successful lookup
/// 2. Sent to the channel with `try_send` (best-effort, never blocks)
/// 3. Processed by [`crate::domain::count_worker::run_count_worker`]
///
/// Delivery is at-least-once end to end; a duplicate merely over-counts by
/// the delivery multiplicity, which is accepted for usage metrics.
#[derive(Debug, Clone)]
pub struct ResolutionEvent {
    pub code: String,
}

impl ResolutionEvent {
    pub fn new(code: String) -> Self {
        Self { code }
    }
}
