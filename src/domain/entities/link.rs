//! Link record entity.

/// A persisted shortened URL.
///
/// `code` and `destination_url` are immutable after creation; `hit_count`
/// only ever grows, applied asynchronously by the count worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub code: String,
    pub destination_url: String,
    pub hit_count: u64,
}

impl LinkRecord {
    pub fn new(code: String, destination_url: String, hit_count: u64) -> Self {
        Self {
            code,
            destination_url,
            hit_count,
        }
    }
}

/// A link record about to be inserted. Hit count always starts at zero.
#[derive(Debug, Clone)]
pub struct NewLinkRecord {
    pub code: String,
    pub destination_url: String,
}

/// Partition key for a code: its first character.
///
/// Affects only physical placement of rows, never the logical contract;
/// codes remain globally unique.
pub fn partition_key(code: &str) -> String {
    code.chars().take(1).collect()
}
