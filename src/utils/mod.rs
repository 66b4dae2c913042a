//! Shared utilities.

pub mod codec;
