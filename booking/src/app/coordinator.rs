//! Application coordinator - owns every component for one data directory.

use crate::advisory::Advisor;
use crate::config::Config;
use crate::engine::{BookingEngine, EngineError};
use crate::queries::QuerySurface;
use booking_core::environment::{Clock, SystemClock};
use booking_core::record_store::{RecordStore, StoreError};
use booking_core::types::Event;
use booking_file_store::JsonFileRecordStore;
use std::sync::Arc;
use thiserror::Error;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Record store could not be opened or seeded
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Engine operation failed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Main booking application.
///
/// Coordinates all components:
/// - Record store (JSON files under `config.store.data_dir`)
/// - Booking engine (the only writer)
/// - Query surface and advisory projections (read-only)
pub struct BookingApp {
    /// Durable record store
    store: Arc<JsonFileRecordStore>,
    /// Booking engine
    pub engine: Arc<BookingEngine>,
    /// Read-only projections
    pub queries: QuerySurface,
    /// Advisory projections
    pub advisor: Arc<Advisor>,
    /// Configuration
    config: Config,
}

impl BookingApp {
    /// Initialize the application with the system clock.
    ///
    /// # Errors
    ///
    /// Returns error if the data directory cannot be opened.
    pub async fn new(config: Config) -> Result<Self, AppError> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    /// Initialize the application with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns error if the data directory cannot be opened.
    pub async fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        tracing::info!(data_dir = %config.store.data_dir.display(), "Initializing Booking Application...");

        let store = Arc::new(JsonFileRecordStore::open(&config.store.data_dir).await?);
        let shared: Arc<dyn RecordStore> = store.clone();
        tracing::info!("✓ Record store opened");

        let engine = Arc::new(BookingEngine::new(Arc::clone(&shared)).with_lookup(config.lookup));
        let queries = engine.queries();
        let advisor = Arc::new(
            Advisor::new(shared, clock)
                .with_config(config.advisory)
                .with_lookup(config.lookup),
        );
        tracing::info!("✓ Engine, queries and advisor initialized");

        Ok(Self {
            store,
            engine,
            queries,
            advisor,
            config,
        })
    }

    /// Write `events` as the catalog unless one already exists.
    ///
    /// Returns whether the catalog was written.
    ///
    /// # Errors
    ///
    /// Returns error if the catalog cannot be inspected or written.
    pub async fn seed_catalog(&self, events: &[Event]) -> Result<bool, AppError> {
        if self.store.has_catalog().await? {
            tracing::debug!("Catalog already present, not seeding");
            return Ok(false);
        }

        self.store.write_catalog(events).await?;
        tracing::info!(events = events.len(), "Catalog seeded");
        Ok(true)
    }

    /// Configuration the application was built with
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
