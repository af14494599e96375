//! Query Surface: read-only projections over the record store.
//!
//! Nothing here takes the writer lock or writes; every call works on a fresh
//! lock-free snapshot.

use crate::capacity::{self, SeatCount};
use crate::engine::EngineError;
use crate::snapshot::StoreSnapshot;
use booking_core::record_store::RecordStore;
use booking_core::types::{Attendee, BookingId, Event, EventId};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::sync::Arc;

/// One of an attendee's `Registered` bookings joined to its event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveBooking {
    /// Booking id
    pub booking_id: BookingId,
    /// Event id
    pub event_id: EventId,
    /// Event name
    pub event_name: String,
    /// Event date
    pub date: NaiveDate,
    /// Event start time
    pub time: NaiveTime,
    /// Event venue
    pub venue: String,
}

/// Booking counts for one attendee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendeeStats {
    /// `Registered` bookings
    pub active: usize,
    /// All booking rows, canceled included
    pub total: usize,
}

/// An event with its current seat figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatReportRow {
    /// The catalog row
    pub event: Event,
    /// Its seat figures
    pub seats: SeatCount,
}

/// Read-only projections.
#[derive(Clone)]
pub struct QuerySurface {
    store: Arc<dyn RecordStore>,
}

impl QuerySurface {
    /// Create a query surface over `store`
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    async fn snapshot(&self) -> Result<StoreSnapshot, EngineError> {
        Ok(StoreSnapshot::load(self.store.as_ref()).await?)
    }

    /// The whole catalog in store order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the catalog cannot be loaded.
    pub async fn list_events(&self) -> Result<Vec<Event>, EngineError> {
        Ok(self.store.load_events().await?)
    }

    /// Catalog rows on `date`, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the catalog cannot be loaded.
    pub async fn events_on(&self, date: NaiveDate) -> Result<Vec<Event>, EngineError> {
        let mut events = self.store.load_events().await?;
        events.retain(|event| event.date == date);
        Ok(events)
    }

    /// `Registered` bookings for `email` (exact match), joined to their events, in
    /// store order. Unknown emails have none.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn active_bookings(&self, email: &str) -> Result<Vec<ActiveBooking>, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(active_bookings(&snapshot, email.trim()))
    }

    /// Active and total booking counts for `email` (zeros when unknown).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn attendee_stats(&self, email: &str) -> Result<AttendeeStats, EngineError> {
        let snapshot = self.snapshot().await?;
        let Some(attendee) = snapshot.attendee_by_email(email.trim()) else {
            return Ok(AttendeeStats::default());
        };

        let (active, total) = snapshot
            .bookings_for(&attendee.id)
            .fold((0, 0), |(active, total), booking| {
                (active + usize::from(booking.is_active()), total + 1)
            });

        Ok(AttendeeStats { active, total })
    }

    /// Attendee whose email matches, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if attendees cannot be loaded.
    pub async fn find_attendee(&self, email: &str) -> Result<Option<Attendee>, EngineError> {
        let snapshot = StoreSnapshot {
            attendees: self.store.load_attendees().await?,
            ..StoreSnapshot::default()
        };
        Ok(snapshot.attendee_by_email_ignore_case(email.trim()).cloned())
    }

    /// Every catalog event with its seat figures, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn seat_report(&self) -> Result<Vec<SeatReportRow>, EngineError> {
        let snapshot = self.snapshot().await?;
        Ok(seat_report(&snapshot))
    }
}

/// Join an attendee's `Registered` bookings to the catalog.
pub(crate) fn active_bookings(snapshot: &StoreSnapshot, email: &str) -> Vec<ActiveBooking> {
    let Some(attendee) = snapshot.attendee_by_email(email) else {
        return Vec::new();
    };

    snapshot
        .active_bookings_for(&attendee.id)
        .filter_map(|booking| {
            let Some(event) = snapshot.event(&booking.event_id) else {
                tracing::warn!(
                    booking_id = %booking.id,
                    event_id = %booking.event_id,
                    "Active booking references a missing event"
                );
                return None;
            };
            Some(ActiveBooking {
                booking_id: booking.id.clone(),
                event_id: event.id.clone(),
                event_name: event.name.clone(),
                date: event.date,
                time: event.time,
                venue: event.venue.clone(),
            })
        })
        .collect()
}

/// Seat figures for every catalog event.
pub(crate) fn seat_report(snapshot: &StoreSnapshot) -> Vec<SeatReportRow> {
    snapshot
        .events
        .iter()
        .map(|event| SeatReportRow {
            event: event.clone(),
            seats: capacity::seat_count(snapshot, event),
        })
        .collect()
}
