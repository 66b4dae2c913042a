#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::mpsc;

use seqlink::application::services::{CounterAllocator, ShortenerService};
use seqlink::domain::count_worker::run_count_worker;
use seqlink::domain::repositories::LinkStore;
use seqlink::infrastructure::persistence::{MemoryCounterStore, MemoryLinkStore};
use seqlink::state::AppState;

pub const FALLBACK_URL: &str = "https://www.thinktecture.com";
pub const SEED: u64 = 1024;

/// A fully wired application over in-memory stores, count worker included.
pub struct TestApp {
    pub state: AppState,
    pub links: Arc<MemoryLinkStore>,
}

pub fn spawn_app() -> TestApp {
    let links = Arc::new(MemoryLinkStore::new());
    let counters = Arc::new(MemoryCounterStore::new());

    let (event_tx, event_rx) = mpsc::channel(1024);
    tokio::spawn(run_count_worker(
        event_rx,
        links.clone(),
    ));

    let allocator = CounterAllocator::new(counters, SEED, 16);
    let shortener = Arc::new(ShortenerService::new(
        links.clone(),
        allocator,
        event_tx.clone(),
        FALLBACK_URL.to_string(),
    ));

    TestApp {
        state: AppState::new(shortener, event_tx),
        links,
    }
}

/// Polls the store until the hit count for `code` reaches `expected`, or
/// fails after a bounded wait. Aggregation is eventually consistent.
pub async fn wait_for_hit_count(links: &MemoryLinkStore, code: &str, expected: u64) {
    for _ in 0..200 {
        if let Some(record) = links.find_by_code(code).await.unwrap() {
            if record.hit_count >= expected {
                assert_eq!(record.hit_count, expected);
                return;
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("hit count for {code} never reached {expected}");
}
