//! In-memory store implementations.
//!
//! Back the service in tests and in the `MEMORY_BACKEND` dev mode. They
//! honor the same conditional-write semantics as the PostgreSQL stores, so
//! allocator and aggregator behavior is exercised faithfully without a
//! database.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::{CounterRecord, LinkRecord, NewLinkRecord};
use crate::domain::repositories::{CounterStore, LinkStore};
use crate::error::AppError;

/// In-process link store over a mutex-guarded map.
#[derive(Default)]
pub struct MemoryLinkStore {
    inner: Mutex<HashMap<String, LinkRecord>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, record: NewLinkRecord) -> Result<(), AppError> {
        let mut links = self.inner.lock().await;
        if links.contains_key(&record.code) {
            return Err(AppError::already_exists(
                "Short code already exists",
                json!({ "code": record.code }),
            ));
        }
        links.insert(
            record.code.clone(),
            LinkRecord::new(record.code, record.destination_url, 0),
        );
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError> {
        Ok(self.inner.lock().await.get(code).cloned())
    }

    async fn increment_hits(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.inner.lock().await;
        match links.get_mut(code) {
            Some(record) => {
                record.hit_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-process counter store with compare-and-swap semantics.
#[derive(Default)]
pub struct MemoryCounterStore {
    inner: Mutex<Option<CounterRecord>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn read(&self) -> Result<Option<u64>, AppError> {
        Ok(self.inner.lock().await.map(|record| record.next_id))
    }

    async fn try_insert(&self, seed: u64) -> Result<bool, AppError> {
        let mut counter = self.inner.lock().await;
        if counter.is_some() {
            return Ok(false);
        }
        *counter = Some(CounterRecord::seeded(seed));
        Ok(true)
    }

    async fn compare_and_swap(&self, current: u64, next: u64) -> Result<bool, AppError> {
        let mut counter = self.inner.lock().await;
        match *counter {
            Some(record) if record.next_id == current => {
                *counter = Some(CounterRecord { next_id: next });
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
