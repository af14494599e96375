//! Record store trait and related types.
//!
//! This module defines the only persistence contract the booking engine relies on:
//! three collections (events, attendees, bookings) that can be loaded whole and, for
//! the two mutable ones, overwritten whole.
//!
//! # Design
//!
//! The `RecordStore` trait is deliberately narrow. It provides exactly what the engine
//! needs and nothing about encoding, indexing or partial updates:
//!
//! - Load the event catalog (read-only from the engine's point of view)
//! - Load and save the attendee collection
//! - Load and save the booking collection
//!
//! Every save is a full-collection overwrite. Callers must reload before mutating so
//! they never clobber a concurrent write; the engine guarantees this by performing
//! reload, mutate and save inside a single critical section.
//!
//! # Implementations
//!
//! - `JsonFileRecordStore` (in `booking-file-store` crate): durable JSON files
//! - `InMemoryRecordStore` (in `booking-testing` crate): fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use booking_core::record_store::{RecordStore, StoreError};
//!
//! async fn count_bookings<S: RecordStore>(store: &S) -> Result<usize, StoreError> {
//!     let bookings = store.load_bookings().await?;
//!     Ok(bookings.len())
//! }
//! ```

use crate::types::{Attendee, Booking, Event};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`RecordStore`] methods
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur during record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying file or device error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The store refused or could not service the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Record store abstraction for the three entity collections.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to be safely shared behind an `Arc` across
/// concurrent requests.
///
/// # Atomicity
///
/// Each individual save must be atomic: a concurrent load observes either the old
/// collection or the new one, never a mix. Nothing stronger is expected; in
/// particular there is no multi-collection transaction.
///
/// # Dyn Compatibility
///
/// This trait uses explicit `Pin<Box<dyn Future>>` returns instead of `async fn`
/// to enable trait object usage (`Arc<dyn RecordStore>`).
pub trait RecordStore: Send + Sync {
    /// Load the event catalog in store order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the catalog cannot be read or decoded.
    fn load_events(&self) -> StoreFuture<'_, Vec<Event>>;

    /// Load every attendee in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read or decoded.
    fn load_attendees(&self) -> StoreFuture<'_, Vec<Attendee>>;

    /// Replace the whole attendee collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be encoded or written.
    fn save_attendees(&self, attendees: Vec<Attendee>) -> StoreFuture<'_, ()>;

    /// Load every booking (active and historical) in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be read or decoded.
    fn load_bookings(&self) -> StoreFuture<'_, Vec<Booking>>;

    /// Replace the whole booking collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the collection cannot be encoded or written.
    fn save_bookings(&self, bookings: Vec<Booking>) -> StoreFuture<'_, ()>;
}

impl<S: RecordStore + ?Sized> RecordStore for std::sync::Arc<S> {
    fn load_events(&self) -> StoreFuture<'_, Vec<Event>> {
        (**self).load_events()
    }

    fn load_attendees(&self) -> StoreFuture<'_, Vec<Attendee>> {
        (**self).load_attendees()
    }

    fn save_attendees(&self, attendees: Vec<Attendee>) -> StoreFuture<'_, ()> {
        (**self).save_attendees(attendees)
    }

    fn load_bookings(&self) -> StoreFuture<'_, Vec<Booking>> {
        (**self).load_bookings()
    }

    fn save_bookings(&self, bookings: Vec<Booking>) -> StoreFuture<'_, ()> {
        (**self).save_bookings(bookings)
    }
}
