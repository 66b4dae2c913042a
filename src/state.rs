use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::ShortenerService;
use crate::domain::resolution_event::ResolutionEvent;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Kept alongside the service so the health check can observe whether
    /// the count pipeline is still alive.
    pub event_tx: mpsc::Sender<ResolutionEvent>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, event_tx: mpsc::Sender<ResolutionEvent>) -> Self {
        Self {
            shortener,
            event_tx,
        }
    }
}
