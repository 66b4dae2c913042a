//! API request/response DTOs.

pub mod shorten;

pub use shorten::ShortenRequest;
