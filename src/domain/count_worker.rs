//! Background worker applying hit-count increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::repositories::LinkStore;
use crate::domain::resolution_event::ResolutionEvent;

/// Consumes resolution events and applies hit increments to the link store.
///
/// Runs until the channel closes. Each event is handled by exactly one
/// worker invocation: look the code up, increment when present, drop and
/// report when absent (the code was never issued - a data inconsistency, not
/// a fatal condition). Store errors are logged and the event is dropped;
/// counts are approximate usage metrics, not billing-grade accounting.
pub async fn run_count_worker(
    mut rx: mpsc::Receiver<ResolutionEvent>,
    links: Arc<dyn LinkStore>,
) {
    while let Some(event) = rx.recv().await {
        match links.find_by_code(&event.code).await {
            Ok(Some(_)) => match links.increment_hits(&event.code).await {
                Ok(true) => {}
                Ok(false) => {
                    warn!(code = %event.code, "link vanished between lookup and increment");
                }
                Err(e) => {
                    warn!(code = %event.code, error = %e, "failed to increment hit count");
                }
            },
            Ok(None) => {
                warn!(code = %event.code, "resolution event for unknown code, dropping");
            }
            Err(e) => {
                warn!(code = %event.code, error = %e, "lookup failed while counting, dropping event");
            }
        }
    }
}
