//! Store trait for short link records.

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Persisted mapping from short code to destination URL plus a hit counter.
///
/// Records are logically partitioned by the first character of the code;
/// partitioning affects physical placement only, never this contract.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkStore`] - in-process,
///   used by tests and the `MEMORY_BACKEND` dev mode
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a new link with a hit count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AlreadyExists`] if the code is already present.
    /// Given allocator uniqueness this should never happen; when it does it
    /// signals a consistency bug and the existing record must be left
    /// untouched.
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn insert(&self, record: NewLinkRecord) -> Result<(), AppError>;

    /// Point lookup by short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LinkRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Atomically increments the hit counter for a code.
    ///
    /// The increment is relative to the stored value, so concurrent
    /// increments from multiple workers never lose counts.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the record was found and incremented, `Ok(false)` if
    /// the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store errors.
    async fn increment_hits(&self, code: &str) -> Result<bool, AppError>;
}
