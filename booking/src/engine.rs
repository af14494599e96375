//! Booking Consistency Engine.
//!
//! The engine is the only component that mutates the record store. It enforces:
//!
//! - `Registered` bookings per event never exceed the event's capacity
//! - at most one `Registered` booking per attendee/event pair
//! - at most one `Registered` booking per attendee per calendar date
//! - attendee and booking ids are unique and minted from the committed rows
//!
//! # Concurrency
//!
//! Every mutating operation runs inside a single writer critical section
//! (`tokio::sync::Mutex`). Inside it the engine reloads a fresh snapshot, re-checks
//! its gates, mints ids and writes. Registration additionally evaluates its gates on a
//! lock-free snapshot first so that obvious rejections never queue behind writers.
//! Read operations never take the lock.
//!
//! # Outcomes vs errors
//!
//! Rejections (`Full`, `ConflictRejected`, `EventNotFound`, ...) are returned as
//! `Ok(outcome)`. Only record store failures surface as [`EngineError`].

use crate::capacity;
use crate::catalog::{EventCatalog, Resolution};
use crate::config::LookupConfig;
use crate::conflict;
use crate::metrics;
use crate::outcome::{
    CancellationOutcome, ConflictCheck, MissingList, RegistrationOutcome, SeatsLeft, SignupOutcome,
};
use crate::queries::QuerySurface;
use crate::snapshot::StoreSnapshot;
use booking_core::record_store::{RecordStore, StoreError};
use booking_core::types::{Attendee, Booking, BookingStatus, Event};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors that can occur while running an engine operation
#[derive(Error, Debug)]
pub enum EngineError {
    /// Record store operation failed
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),
}

/// Trim every value; report the names of the ones that end up empty.
fn require<'a, const N: usize>(
    fields: [(&'static str, &'a str); N],
) -> Result<[&'a str; N], MissingList> {
    let missing: MissingList = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(fields.map(|(_, value)| value.trim()))
    } else {
        Err(missing)
    }
}

/// Registration, cancellation and signup over a [`RecordStore`].
///
/// # Example
///
/// ```
/// use booking::engine::BookingEngine;
/// use booking_testing::{InMemoryRecordStore, sample_catalog};
/// use std::sync::Arc;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryRecordStore::with_events(sample_catalog());
/// let engine = BookingEngine::new(Arc::new(store.clone()));
///
/// let outcome = engine
///     .register("Ada", "ada@example.com", "TechFest 2025")
///     .await
///     .unwrap();
/// assert!(outcome.is_registered());
/// assert_eq!(store.bookings().len(), 1);
/// # });
/// ```
pub struct BookingEngine {
    store: Arc<dyn RecordStore>,
    writer: Mutex<()>,
    lookup: LookupConfig,
}

impl BookingEngine {
    /// Create an engine with default lookup settings
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
            lookup: LookupConfig::default(),
        }
    }

    /// Override suggestion limit and cutoff
    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupConfig) -> Self {
        self.lookup = lookup;
        self
    }

    /// Read-only projections over the same store
    #[must_use]
    pub fn queries(&self) -> QuerySurface {
        QuerySurface::new(Arc::clone(&self.store))
    }

    /// Load a lock-free snapshot of the store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if any collection fails to load.
    pub async fn snapshot(&self) -> Result<StoreSnapshot, EngineError> {
        StoreSnapshot::load(self.store.as_ref())
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to load store snapshot"))
            .map_err(EngineError::from)
    }

    fn catalog<'s>(&self, snapshot: &'s StoreSnapshot) -> EventCatalog<'s> {
        EventCatalog::new(&snapshot.events, self.lookup)
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Seats left for the referenced event.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn seats_left(&self, event_ref: &str) -> Result<SeatsLeft, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(match self.catalog(&snapshot).resolve(event_ref) {
            Resolution::Found(event) => SeatsLeft::Available {
                event_id: event.id.clone(),
                event_name: event.name.clone(),
                seats: capacity::seat_count(&snapshot, event),
            },
            Resolution::NotFound { query, suggestions } => {
                SeatsLeft::EventNotFound { query, suggestions }
            }
        })
    }

    /// Active bookings `email` holds on the referenced event's date.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn detect_conflict(
        &self,
        email: &str,
        event_ref: &str,
    ) -> Result<ConflictCheck, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(match self.catalog(&snapshot).resolve(event_ref) {
            Resolution::Found(event) => {
                ConflictCheck::Checked(conflict::detect(&snapshot, email.trim(), event))
            }
            Resolution::NotFound { query, suggestions } => {
                ConflictCheck::EventNotFound { query, suggestions }
            }
        })
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register the attendee identified by `email` for the referenced event.
    ///
    /// Gates, each short-circuiting: missing fields, unknown event, same-date
    /// conflict, no seats left, already registered, no seats left on re-check. An
    /// unseen email gets an attendee row once the event has passed the conflict and
    /// capacity gates; that row stays even if the re-check then rejects the booking.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store fails to load or save. An
    /// attendee created before a failed booking write is kept.
    #[tracing::instrument(skip(self), name = "booking_register")]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        event_ref: &str,
    ) -> Result<RegistrationOutcome, EngineError> {
        let outcome = self.try_register(name, email, event_ref).await?;
        metrics::record_registration(outcome.label());
        Ok(outcome)
    }

    async fn try_register(
        &self,
        name: &str,
        email: &str,
        event_ref: &str,
    ) -> Result<RegistrationOutcome, EngineError> {
        let [name, email, event_ref] =
            match require([("name", name), ("email", email), ("event", event_ref)]) {
                Ok(values) => values,
                Err(fields) => {
                    tracing::debug!(?fields, "Registration rejected: missing fields");
                    return Ok(RegistrationOutcome::MissingFields { fields });
                }
            };

        // Fast rejection without queueing behind writers
        {
            let snapshot = self.snapshot().await?;
            if let Err(rejection) = self.admit(&snapshot, email, event_ref) {
                tracing::debug!(outcome = rejection.label(), "Registration rejected");
                return Ok(rejection);
            }
        }

        let _writer = self.writer.lock().await;
        let mut snapshot = self.snapshot().await?;

        let event = match self.screen(&snapshot, email, event_ref) {
            Ok(event) => event.clone(),
            Err(rejection) => {
                tracing::debug!(outcome = rejection.label(), "Registration rejected under lock");
                return Ok(rejection);
            }
        };

        let attendee_id = if let Some(existing) = snapshot.attendee_by_email(email) {
            existing.id.clone()
        } else {
            let attendee = Attendee {
                id: snapshot.next_attendee_id(),
                name: name.to_string(),
                email: email.to_string(),
            };
            let id = attendee.id.clone();
            snapshot.attendees.push(attendee);
            self.store.save_attendees(snapshot.attendees.clone()).await?;
            metrics::record_attendee_created();
            tracing::info!(attendee_id = %id, "Attendee created");
            id
        };

        if let Some(index) = snapshot.active_booking_index(&attendee_id, &event.id) {
            return Ok(RegistrationOutcome::AlreadyRegistered {
                booking_id: snapshot.bookings[index].id.clone(),
                event_name: event.name,
            });
        }

        // Capacity may have moved since the lock-free check; the attendee row stays.
        let seats = capacity::seat_count(&snapshot, &event);
        if seats.is_full() {
            tracing::debug!(event_id = %event.id, "Registration rejected under lock: full");
            return Ok(RegistrationOutcome::Full {
                event_name: event.name,
                waitlisted: true,
            });
        }

        let booking = Booking::registered(
            snapshot.next_booking_id(),
            attendee_id.clone(),
            event.id.clone(),
        );
        let booking_id = booking.id.clone();
        snapshot.bookings.push(booking);
        self.store.save_bookings(snapshot.bookings).await?;

        let seats_left = seats.seats_left.saturating_sub(1);
        metrics::update_seats_left(event.id.as_str(), seats_left);
        tracing::info!(
            booking_id = %booking_id,
            attendee_id = %attendee_id,
            event_id = %event.id,
            seats_left,
            "Booking registered"
        );

        Ok(RegistrationOutcome::Registered {
            booking_id,
            attendee_id,
            event_id: event.id,
            event_name: event.name,
        })
    }

    /// Event resolution and conflict gates.
    fn screen<'s>(
        &self,
        snapshot: &'s StoreSnapshot,
        email: &str,
        event_ref: &str,
    ) -> Result<&'s Event, RegistrationOutcome> {
        let event = match self.catalog(snapshot).resolve(event_ref) {
            Resolution::Found(event) => event,
            Resolution::NotFound { query, suggestions } => {
                return Err(RegistrationOutcome::EventNotFound { query, suggestions });
            }
        };

        let clash = conflict::detect(snapshot, email, event);
        if clash.has_conflict() {
            return Err(RegistrationOutcome::ConflictRejected {
                conflicts: clash.conflicts,
            });
        }

        Ok(event)
    }

    /// [`Self::screen`] plus the capacity gate.
    ///
    /// An attendee who already holds a seat on the event is let through the capacity
    /// gate so the idempotence check can report `AlreadyRegistered`.
    fn admit<'s>(
        &self,
        snapshot: &'s StoreSnapshot,
        email: &str,
        event_ref: &str,
    ) -> Result<&'s Event, RegistrationOutcome> {
        let event = self.screen(snapshot, email, event_ref)?;

        let holds_seat = snapshot
            .attendee_by_email(email)
            .is_some_and(|a| snapshot.active_booking_index(&a.id, &event.id).is_some());
        if !holds_seat && capacity::seat_count(snapshot, event).is_full() {
            return Err(RegistrationOutcome::Full {
                event_name: event.name.clone(),
                waitlisted: true,
            });
        }

        Ok(event)
    }

    // ========================================================================
    // Cancellation
    // ========================================================================

    /// Cancel the attendee's active booking for the referenced event.
    ///
    /// The booking row is kept with status `Canceled`; one seat is released.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store fails to load or save.
    #[tracing::instrument(skip(self), name = "booking_cancel")]
    pub async fn cancel(
        &self,
        email: &str,
        event_ref: &str,
    ) -> Result<CancellationOutcome, EngineError> {
        let outcome = self.try_cancel(email, event_ref).await?;
        metrics::record_cancellation(outcome.label());
        Ok(outcome)
    }

    async fn try_cancel(
        &self,
        email: &str,
        event_ref: &str,
    ) -> Result<CancellationOutcome, EngineError> {
        let [email, event_ref] = match require([("email", email), ("event", event_ref)]) {
            Ok(values) => values,
            Err(fields) => return Ok(CancellationOutcome::MissingFields { fields }),
        };

        let _writer = self.writer.lock().await;
        let mut snapshot = self.snapshot().await?;

        let Some(attendee_id) = snapshot.attendee_by_email(email).map(|a| a.id.clone()) else {
            tracing::debug!("Cancellation rejected: unknown attendee");
            return Ok(CancellationOutcome::AttendeeNotFound {
                email: email.to_string(),
            });
        };

        let event = match self.catalog(&snapshot).resolve(event_ref) {
            Resolution::Found(event) => event.clone(),
            Resolution::NotFound { query, suggestions } => {
                return Ok(CancellationOutcome::EventNotFound { query, suggestions });
            }
        };

        let Some(index) = snapshot.active_booking_index(&attendee_id, &event.id) else {
            tracing::debug!(event_id = %event.id, "Cancellation rejected: no active booking");
            return Ok(CancellationOutcome::NoActiveBooking {
                event_name: event.name,
            });
        };

        snapshot.bookings[index].status = BookingStatus::Canceled;
        let booking_id = snapshot.bookings[index].id.clone();
        let seats = capacity::seat_count(&snapshot, &event);
        self.store.save_bookings(snapshot.bookings).await?;

        metrics::update_seats_left(event.id.as_str(), seats.seats_left);
        tracing::info!(
            booking_id = %booking_id,
            event_id = %event.id,
            seats_left = seats.seats_left,
            "Booking canceled"
        );

        Ok(CancellationOutcome::Canceled {
            booking_id,
            event_name: event.name,
            freed_seat: true,
        })
    }

    // ========================================================================
    // Signup
    // ========================================================================

    /// Create an attendee without booking anything.
    ///
    /// Emails are compared ignoring case, so `Ada@Example.com` cannot sign up
    /// alongside `ada@example.com`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the store fails to load or save.
    #[tracing::instrument(skip(self), name = "booking_sign_up")]
    pub async fn sign_up(&self, name: &str, email: &str) -> Result<SignupOutcome, EngineError> {
        let [name, email] = match require([("name", name), ("email", email)]) {
            Ok(values) => values,
            Err(fields) => return Ok(SignupOutcome::MissingFields { fields }),
        };

        let _writer = self.writer.lock().await;
        let mut snapshot = self.snapshot().await?;

        if let Some(existing) = snapshot.attendee_by_email_ignore_case(email) {
            tracing::debug!(attendee_id = %existing.id, "Signup rejected: email taken");
            return Ok(SignupOutcome::EmailTaken {
                existing: existing.clone(),
            });
        }

        let attendee = Attendee {
            id: snapshot.next_attendee_id(),
            name: name.to_string(),
            email: email.to_string(),
        };
        snapshot.attendees.push(attendee.clone());
        self.store.save_attendees(snapshot.attendees).await?;

        metrics::record_attendee_created();
        tracing::info!(attendee_id = %attendee.id, "Attendee signed up");

        Ok(SignupOutcome::Created { attendee })
    }
}
