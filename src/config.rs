//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string (unless `MEMORY_BACKEND`
//!   is set)
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `FALLBACK_URL` - Redirect target for unknown codes
//!   (default: `https://www.thinktecture.com`)
//! - `COUNTER_SEED` - First allocated ID (default: 1024; seeding above zero
//!   guarantees a minimum code length)
//! - `EVENT_QUEUE_CAPACITY` - Resolution event buffer size (default: 10000)
//! - `ALLOC_MAX_RETRIES` - Conditional-write retry budget for the counter
//!   (default: 16)
//! - `MEMORY_BACKEND` - Use in-process stores instead of PostgreSQL; for
//!   development only, state is lost on restart
//! - `RUST_LOG` - Log filter (default: `info`)

use anyhow::{Result, bail};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub fallback_url: String,
    pub counter_seed: u64,
    pub event_queue_capacity: usize,
    pub alloc_max_retries: usize,
    pub memory_backend: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing while the PostgreSQL
    /// backend is selected.
    pub fn from_env() -> Result<Self> {
        let memory_backend = env::var("MEMORY_BACKEND")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let database_url = env::var("DATABASE_URL").ok();
        if !memory_backend && database_url.is_none() {
            bail!("DATABASE_URL must be set (or MEMORY_BACKEND enabled)");
        }

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let fallback_url = env::var("FALLBACK_URL")
            .unwrap_or_else(|_| "https://www.thinktecture.com".to_string());

        let counter_seed = env::var("COUNTER_SEED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let event_queue_capacity = env::var("EVENT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let alloc_max_retries = env::var("ALLOC_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16);

        Ok(Self {
            database_url,
            listen_addr,
            fallback_url,
            counter_seed,
            event_queue_capacity,
            alloc_max_retries,
            memory_backend,
        })
    }
}
