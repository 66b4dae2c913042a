//! Store implementations.

pub mod memory;
pub mod pg_counter_store;
pub mod pg_link_store;

pub use memory::{MemoryCounterStore, MemoryLinkStore};
pub use pg_counter_store::PgCounterStore;
pub use pg_link_store::PgLinkStore;
