//! Unique ID allocation against the persisted counter.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{FixedInterval, jitter};

use crate::domain::repositories::CounterStore;
use crate::error::AppError;

/// Allocates strictly increasing integer IDs from the persisted counter.
///
/// Each allocation is a single atomic read-modify-conditional-write: read the
/// current value, persist `current + 1` predicated on `current`, return the
/// pre-increment value. A lost race retries with a fresh read under a short
/// jittered backoff; the counter is never cached in process, so any number of
/// replicas allocate correctly against the same store.
///
/// The counter row is created lazily on the first allocation, seeded from
/// configuration. Seeding well above zero guarantees a minimum code length.
pub struct CounterAllocator {
    store: Arc<dyn CounterStore>,
    seed: u64,
    max_retries: usize,
}

impl CounterAllocator {
    pub fn new(store: Arc<dyn CounterStore>, seed: u64, max_retries: usize) -> Self {
        Self {
            store,
            seed,
            max_retries,
        }
    }

    /// Returns the next unique ID, strictly greater than every previously
    /// returned value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationContention`] when the conditional write
    /// keeps losing races past the retry budget; the caller may safely retry
    /// the whole operation and will receive a fresh ID.
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors, without
    /// retrying.
    pub async fn next(&self) -> Result<u64, AppError> {
        let strategy = FixedInterval::from_millis(2).map(jitter).take(self.max_retries);

        RetryIf::spawn(
            strategy,
            || self.try_allocate(),
            |e: &AppError| matches!(e, AppError::AllocationContention { .. }),
        )
        .await
    }

    /// One allocation attempt: a single conditional write, no looping.
    async fn try_allocate(&self) -> Result<u64, AppError> {
        let current = match self.store.read().await? {
            Some(value) => value,
            None => {
                if self.store.try_insert(self.seed).await? {
                    self.seed
                } else {
                    // Lost the creation race; the row exists now.
                    self.store.read().await?.ok_or_else(|| {
                        AppError::store_unavailable(
                            "Counter row disappeared after creation race",
                            json!({}),
                        )
                    })?
                }
            }
        };

        if self.store.compare_and_swap(current, current + 1).await? {
            Ok(current)
        } else {
            Err(AppError::contention(
                "Lost a conditional-write race on the counter",
                json!({ "read_value": current }),
            ))
        }
    }
}
