//! JSON file record store for the booking consistency engine.
//!
//! This crate provides a durable record store that implements the `RecordStore` trait
//! from `booking-core`. Each collection lives in its own JSON file inside a data
//! directory:
//!
//! ```text
//! data/
//! ├── events.json      (catalog, read-only for the engine)
//! ├── attendees.json
//! └── bookings.json
//! ```
//!
//! - A missing file reads as an empty collection
//! - Saves write a temporary sibling file and rename it over the target, so a reader
//!   never observes a half-written collection
//!
//! # Example
//!
//! ```no_run
//! use booking_core::record_store::RecordStore;
//! use booking_file_store::JsonFileRecordStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileRecordStore::open("data").await?;
//!     let events = store.load_events().await?;
//!     println!("{} events in catalog", events.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use booking_core::record_store::{RecordStore, StoreError, StoreFuture};
use booking_core::types::{Attendee, Booking, Event};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const EVENTS_FILE: &str = "events.json";
const ATTENDEES_FILE: &str = "attendees.json";
const BOOKINGS_FILE: &str = "bookings.json";

/// Record store backed by one JSON document per collection.
#[derive(Debug)]
pub struct JsonFileRecordStore {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl JsonFileRecordStore {
    /// Open (and create if needed) a data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", dir.display())))?;

        tracing::debug!(dir = %dir.display(), "Opened JSON record store");

        Ok(Self {
            dir,
            write_seq: AtomicU64::new(0),
        })
    }

    /// Data directory this store reads and writes
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Replace the event catalog.
    ///
    /// The engine never writes events; this exists for provisioning a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the catalog cannot be encoded or written.
    pub async fn write_catalog(&self, events: &[Event]) -> Result<(), StoreError> {
        self.write_collection(EVENTS_FILE, events).await
    }

    /// Whether the catalog file exists and holds at least one event.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the catalog exists but cannot be read.
    pub async fn has_catalog(&self) -> Result<bool, StoreError> {
        let events: Vec<Event> = self.read_collection(EVENTS_FILE).await?;
        Ok(!events.is_empty())
    }

    async fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.dir.join(file);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {e}", path.display()))),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))
    }

    async fn write_collection<T: Serialize>(&self, file: &str, rows: &[T]) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let bytes = serde_json::to_vec_pretty(rows)
            .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))?;

        // Unique per write so concurrent saves of the same collection never share a temp file
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!(".{file}.{seq}.tmp"));

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {e}", tmp.display())))?;

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::Io(format!("{}: {e}", path.display())));
        }

        metrics::counter!("booking_store_writes_total", "collection" => file.to_owned()).increment(1);
        tracing::debug!(file, rows = rows.len(), bytes = bytes.len(), "Collection written");

        Ok(())
    }
}

impl RecordStore for JsonFileRecordStore {
    fn load_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(self.read_collection(EVENTS_FILE))
    }

    fn load_attendees(&self) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(self.read_collection(ATTENDEES_FILE))
    }

    fn save_attendees(&self, attendees: Vec<Attendee>) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.write_collection(ATTENDEES_FILE, &attendees).await })
    }

    fn load_bookings(&self) -> StoreFuture<'_, Vec<Booking>> {
        Box::pin(self.read_collection(BOOKINGS_FILE))
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> StoreFuture<'_, ()> {
        Box::pin(async move { self.write_collection(BOOKINGS_FILE, &bookings).await })
    }
}
