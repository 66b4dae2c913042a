//! Domain entities.

pub mod counter;
pub mod link;

pub use counter::CounterRecord;
pub use link::{LinkRecord, NewLinkRecord, partition_key};
