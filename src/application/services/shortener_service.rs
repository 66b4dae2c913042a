//! Create/resolve orchestration over the allocator, codec, and link store.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::application::services::CounterAllocator;
use crate::domain::entities::NewLinkRecord;
use crate::domain::repositories::LinkStore;
use crate::domain::resolution_event::ResolutionEvent;
use crate::error::AppError;
use crate::utils::codec;

/// Façade implementing the create and resolve operations.
///
/// Coordination between concurrent callers happens entirely through the
/// store's conditional writes; the service itself holds no mutable state, so
/// it can run as any number of independent replicas.
pub struct ShortenerService {
    links: Arc<dyn LinkStore>,
    allocator: CounterAllocator,
    event_tx: mpsc::Sender<ResolutionEvent>,
    fallback_url: String,
}

impl ShortenerService {
    pub fn new(
        links: Arc<dyn LinkStore>,
        allocator: CounterAllocator,
        event_tx: mpsc::Sender<ResolutionEvent>,
        fallback_url: String,
    ) -> Self {
        Self {
            links,
            allocator,
            event_tx,
            fallback_url,
        }
    }

    /// Shortens a URL and returns the allocated code.
    ///
    /// Allocates a fresh ID, encodes it, and inserts the link record. The
    /// counter write and the link insert are two separate writes with no
    /// spanning transaction: a crash between them burns an ID that never
    /// becomes a link, which is a harmless permanent gap.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] for an empty or blank URL, before any
    ///   side effect
    /// - [`AppError::AllocationContention`] / [`AppError::StoreUnavailable`]
    ///   propagated from the allocator and store
    /// - [`AppError::AlreadyExists`] if the freshly encoded code collides
    ///   with a stored one, which indicates an allocator or codec bug
    pub async fn create(&self, destination_url: &str) -> Result<String, AppError> {
        if destination_url.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Destination URL must not be empty",
                json!({}),
            ));
        }

        let id = self.allocator.next().await?;
        let code = codec::encode(id);

        let insert = self
            .links
            .insert(NewLinkRecord {
                code: code.clone(),
                destination_url: destination_url.to_string(),
            })
            .await;

        if let Err(e) = insert {
            if matches!(e, AppError::AlreadyExists { .. }) {
                // Allocator uniqueness should make this impossible.
                error!(
                    code = %code,
                    id,
                    "freshly allocated code already present, allocator or codec consistency bug"
                );
            }
            return Err(e);
        }

        Ok(code)
    }

    /// Resolves a code to its destination URL.
    ///
    /// Codes are folded to uppercase before lookup; the encoder only emits
    /// uppercase but callers supply mixed case. An unknown code degrades to
    /// the configured fallback URL rather than erroring, so a broken link
    /// still redirects somewhere sensible.
    ///
    /// On a successful lookup a [`ResolutionEvent`] is published best-effort:
    /// a full or closed channel never delays or fails the redirect.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] for an empty code
    /// - [`AppError::StoreUnavailable`] propagated from the store
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(AppError::invalid_input(
                "Short code must not be empty",
                json!({}),
            ));
        }

        let Some(record) = self.links.find_by_code(&code).await? else {
            debug!(code = %code, "unknown code, redirecting to fallback");
            return Ok(self.fallback_url.clone());
        };

        if let Err(e) = self.event_tx.try_send(ResolutionEvent::new(code)) {
            debug!(error = %e, "dropping resolution event, count channel unavailable");
        }

        Ok(record.destination_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkRecord;
    use crate::domain::repositories::{MockCounterStore, MockLinkStore};

    const FALLBACK: &str = "https://www.thinktecture.com";

    fn counter_at(value: u64) -> CounterAllocator {
        let mut mock = MockCounterStore::new();
        mock.expect_read().returning(move || Ok(Some(value)));
        mock.expect_compare_and_swap().returning(|_, _| Ok(true));
        CounterAllocator::new(Arc::new(mock), 1024, 4)
    }

    fn service(
        links: MockLinkStore,
        allocator: CounterAllocator,
    ) -> (ShortenerService, mpsc::Receiver<ResolutionEvent>) {
        let (tx, rx) = mpsc::channel(16);
        (
            ShortenerService::new(Arc::new(links), allocator, tx, FALLBACK.to_string()),
            rx,
        )
    }

    #[tokio::test]
    async fn test_create_allocates_encodes_and_inserts() {
        let mut links = MockLinkStore::new();
        links
            .expect_insert()
            .withf(|record| {
                record.code == "BNK" && record.destination_url == "https://example.com"
            })
            .times(1)
            .returning(|_| Ok(()));

        let (service, _rx) = service(links, counter_at(1024));
        let code = service.create("https://example.com").await.unwrap();
        assert_eq!(code, "BNK");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_url_before_allocation() {
        let mut links = MockLinkStore::new();
        links.expect_insert().times(0);

        // An allocator whose store would fail loudly if touched.
        let mut counter = MockCounterStore::new();
        counter.expect_read().times(0);
        let allocator = CounterAllocator::new(Arc::new(counter), 1024, 4);

        let (service, _rx) = service(links, allocator);
        for url in ["", "   "] {
            let result = service.create(url).await;
            assert!(matches!(result, Err(AppError::InvalidInput { .. })));
        }
    }

    #[tokio::test]
    async fn test_create_propagates_duplicate_code_as_consistency_bug() {
        let mut links = MockLinkStore::new();
        links.expect_insert().times(1).returning(|_| {
            Err(AppError::already_exists("duplicate", json!({})))
        });

        let (service, _rx) = service(links, counter_at(1024));
        let result = service.create("https://example.com").await;
        assert!(matches!(result, Err(AppError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_create_propagates_contention() {
        let mut counter = MockCounterStore::new();
        counter.expect_read().returning(|| Ok(Some(10)));
        counter.expect_compare_and_swap().returning(|_, _| Ok(false));
        let allocator = CounterAllocator::new(Arc::new(counter), 1024, 2);

        let mut links = MockLinkStore::new();
        links.expect_insert().times(0);

        let (service, _rx) = service(links, allocator);
        let result = service.create("https://example.com").await;
        assert!(matches!(
            result,
            Err(AppError::AllocationContention { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_returns_destination_and_emits_event() {
        let mut links = MockLinkStore::new();
        links.expect_find_by_code().withf(|code| code == "BNK").returning(|_| {
            Ok(Some(LinkRecord::new(
                "BNK".to_string(),
                "https://example.com".to_string(),
                0,
            )))
        });

        let (service, mut rx) = service(links, counter_at(1024));
        let url = service.resolve("BNK").await.unwrap();
        assert_eq!(url, "https://example.com");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.code, "BNK");
    }

    #[tokio::test]
    async fn test_resolve_normalizes_case_before_lookup() {
        let mut links = MockLinkStore::new();
        links
            .expect_find_by_code()
            .withf(|code| code == "BNK")
            .times(1)
            .returning(|_| {
                Ok(Some(LinkRecord::new(
                    "BNK".to_string(),
                    "https://example.com".to_string(),
                    0,
                )))
            });

        let (service, _rx) = service(links, counter_at(1024));
        let url = service.resolve("bnk").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_degrades_to_fallback() {
        let mut links = MockLinkStore::new();
        links.expect_find_by_code().returning(|_| Ok(None));

        let (service, mut rx) = service(links, counter_at(1024));
        let url = service.resolve("ZZZZ").await.unwrap();
        assert_eq!(url, FALLBACK);

        // No event for a miss.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_empty_code_is_invalid() {
        let links = MockLinkStore::new();
        let (service, _rx) = service(links, counter_at(1024));
        let result = service.resolve("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_resolve_survives_full_event_channel() {
        let mut links = MockLinkStore::new();
        links.expect_find_by_code().returning(|_| {
            Ok(Some(LinkRecord::new(
                "BNK".to_string(),
                "https://example.com".to_string(),
                0,
            )))
        });

        let (tx, _rx) = mpsc::channel(1);
        // Fill the channel so try_send fails.
        tx.try_send(ResolutionEvent::new("X".to_string())).unwrap();

        let service =
            ShortenerService::new(Arc::new(links), counter_at(1024), tx, FALLBACK.to_string());
        let url = service.resolve("BNK").await.unwrap();
        assert_eq!(url, "https://example.com");
    }
}
