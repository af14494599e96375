//! In-memory record store testing utilities
//!
//! Provides fast, deterministic testing infrastructure for the engine:
//! - [`InMemoryRecordStore`]: `Vec`-backed collections behind a lock
//! - [`FailingRecordStore`]: wraps the in-memory store and fails writes on demand

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Test utilities document panics where critical

use booking_core::record_store::{RecordStore, StoreError, StoreFuture};
use booking_core::types::{Attendee, Booking, Event};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Debug, Default)]
struct Collections {
    events: Vec<Event>,
    attendees: Vec<Attendee>,
    bookings: Vec<Booking>,
}

/// In-memory record store for fast, deterministic testing.
///
/// Cloning is cheap and every clone shares the same collections, so a test can hand
/// one clone to the engine and keep another for assertions.
///
/// An optional per-call latency widens the window between a load and the following
/// save, which makes unguarded read-modify-write races reproducible.
///
/// # Example
///
/// ```
/// use booking_testing::{InMemoryRecordStore, sample_catalog};
/// use booking_core::record_store::RecordStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryRecordStore::with_events(sample_catalog());
///
/// let events = store.load_events().await?;
/// assert!(!events.is_empty());
/// assert!(store.bookings().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordStore {
    data: Arc<RwLock<Collections>>,
    latency: Option<Duration>,
    saves: Arc<AtomicUsize>,
}

impl InMemoryRecordStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose catalog holds the given events
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let store = Self::new();
        store.data.write().unwrap().events = events;
        store
    }

    /// Sleep for `latency` inside every load and save
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed attendees directly, bypassing the engine
    pub fn seed_attendees(&self, attendees: Vec<Attendee>) {
        self.data.write().unwrap().attendees = attendees;
    }

    /// Seed bookings directly, bypassing the engine
    pub fn seed_bookings(&self, bookings: Vec<Booking>) {
        self.data.write().unwrap().bookings = bookings;
    }

    /// Current attendee rows
    #[must_use]
    pub fn attendees(&self) -> Vec<Attendee> {
        self.data.read().unwrap().attendees.clone()
    }

    /// Current booking rows
    #[must_use]
    pub fn bookings(&self) -> Vec<Booking> {
        self.data.read().unwrap().bookings.clone()
    }

    /// Number of `save_*` calls that reached the store
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn load_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            self.pause().await;
            Ok(self.data.read().unwrap().events.clone())
        })
    }

    fn load_attendees(&self) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(async move {
            self.pause().await;
            Ok(self.data.read().unwrap().attendees.clone())
        })
    }

    fn save_attendees(&self, attendees: Vec<Attendee>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.pause().await;
            self.data.write().unwrap().attendees = attendees;
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn load_bookings(&self) -> StoreFuture<'_, Vec<Booking>> {
        Box::pin(async move {
            self.pause().await;
            Ok(self.data.read().unwrap().bookings.clone())
        })
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.pause().await;
            self.data.write().unwrap().bookings = bookings;
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

/// Record store that delegates to an [`InMemoryRecordStore`] but can be told to
/// reject reads or writes, for exercising error propagation.
#[derive(Clone, Debug, Default)]
pub struct FailingRecordStore {
    inner: InMemoryRecordStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl FailingRecordStore {
    /// Wrap an existing in-memory store
    #[must_use]
    pub fn new(inner: InMemoryRecordStore) -> Self {
        Self {
            inner,
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent load fail (or succeed again)
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The wrapped store, for assertions
    #[must_use]
    pub const fn inner(&self) -> &InMemoryRecordStore {
        &self.inner
    }

    fn read_guard(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }

    fn write_guard(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Io("writes disabled".to_string()));
        }
        Ok(())
    }
}

impl RecordStore for FailingRecordStore {
    fn load_events(&self) -> StoreFuture<'_, Vec<Event>> {
        Box::pin(async move {
            self.read_guard()?;
            self.inner.load_events().await
        })
    }

    fn load_attendees(&self) -> StoreFuture<'_, Vec<Attendee>> {
        Box::pin(async move {
            self.read_guard()?;
            self.inner.load_attendees().await
        })
    }

    fn save_attendees(&self, attendees: Vec<Attendee>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.write_guard()?;
            self.inner.save_attendees(attendees).await
        })
    }

    fn load_bookings(&self) -> StoreFuture<'_, Vec<Booking>> {
        Box::pin(async move {
            self.read_guard()?;
            self.inner.load_bookings().await
        })
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.write_guard()?;
            self.inner.save_bookings(bookings).await
        })
    }
}
