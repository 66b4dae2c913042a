//! Store trait for the singleton allocation counter.

use crate::error::AppError;
use async_trait::async_trait;

/// Persistence primitives for the allocation counter.
///
/// The stored value doubles as the optimistic-concurrency token (the ETag
/// analog of a table store): [`CounterStore::compare_and_swap`] is predicated
/// on the value the caller previously read. All allocation logic lives in
/// [`crate::application::services::CounterAllocator`]; implementations only
/// provide the conditional-write primitives, which is what keeps the system
/// correct across independent replicas with no shared memory.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCounterStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryCounterStore`] - in-process
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Reads the current counter value, or `None` if the counter row has
    /// never been created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn read(&self) -> Result<Option<u64>, AppError>;

    /// Creates the counter row with the given seed, insert-if-absent.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if this call created the row, `Ok(false)` if another
    /// caller created it first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn try_insert(&self, seed: u64) -> Result<bool, AppError>;

    /// Conditionally replaces the counter value.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the stored value still equalled `current` and was
    /// replaced with `next`, `Ok(false)` if a concurrent writer got there
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn compare_and_swap(&self, current: u64, next: u64) -> Result<bool, AppError>;
}
