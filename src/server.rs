//! HTTP server initialization and runtime setup.
//!
//! Handles store setup, count worker spawning, and Axum server lifecycle.

use crate::application::services::{CounterAllocator, ShortenerService};
use crate::config::Config;
use crate::domain::count_worker::run_count_worker;
use crate::domain::repositories::{CounterStore, LinkStore};
use crate::infrastructure::persistence::{
    MemoryCounterStore, MemoryLinkStore, PgCounterStore, PgLinkStore,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or in-memory stores)
/// - Background count worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration, server bind, or
/// server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let (links, counters): (Arc<dyn LinkStore>, Arc<dyn CounterStore>) = if config.memory_backend {
        tracing::warn!("Using in-memory stores, state is lost on restart");
        (
            Arc::new(MemoryLinkStore::new()),
            Arc::new(MemoryCounterStore::new()),
        )
    } else {
        let database_url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL must be set")?;
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to migrate")?;

        let pool = Arc::new(pool);
        (
            Arc::new(PgLinkStore::new(pool.clone())),
            Arc::new(PgCounterStore::new(pool)),
        )
    };

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    tokio::spawn(run_count_worker(event_rx, links.clone()));
    tracing::info!("Count worker started");

    let allocator = CounterAllocator::new(
        counters,
        config.counter_seed,
        config.alloc_max_retries,
    );
    let shortener = Arc::new(ShortenerService::new(
        links,
        allocator,
        event_tx.clone(),
        config.fallback_url.clone(),
    ));

    let state = AppState::new(shortener, event_tx);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
