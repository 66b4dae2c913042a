//! Core business entities, store traits, and the count worker.

pub mod count_worker;
pub mod entities;
pub mod repositories;
pub mod resolution_event;
