//! Application services.

pub mod allocator;
pub mod shortener_service;

pub use allocator::CounterAllocator;
pub use shortener_service::ShortenerService;
