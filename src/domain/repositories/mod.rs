//! Store traits implemented by the persistence layer.

pub mod counter_store;
pub mod link_store;

pub use counter_store::CounterStore;
pub use link_store::LinkStore;

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use link_store::MockLinkStore;
