//! Point-in-time view of the record store.
//!
//! Every engine operation works on a [`StoreSnapshot`]: the three collections loaded
//! together. Reads for display use a snapshot directly; mutations reload one inside
//! the writer critical section so ids and checks see the latest committed rows.

use booking_core::record_store::{RecordStore, StoreError};
use booking_core::types::{Attendee, AttendeeId, Booking, BookingId, Event, EventId};

/// The three collections as loaded at one point in time.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Event catalog in store order
    pub events: Vec<Event>,
    /// Attendees in insertion order
    pub attendees: Vec<Attendee>,
    /// Bookings (active and historical) in insertion order
    pub bookings: Vec<Booking>,
}

impl StoreSnapshot {
    /// Load all three collections concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] raised by any of the loads.
    pub async fn load(store: &dyn RecordStore) -> Result<Self, StoreError> {
        let (events, attendees, bookings) = futures::try_join!(
            store.load_events(),
            store.load_attendees(),
            store.load_bookings(),
        )?;

        Ok(Self {
            events,
            attendees,
            bookings,
        })
    }

    /// Attendee whose email equals `email` exactly (case-sensitive).
    #[must_use]
    pub fn attendee_by_email(&self, email: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.email == email)
    }

    /// Attendee whose email equals `email` after Unicode lower-casing both sides.
    #[must_use]
    pub fn attendee_by_email_ignore_case(&self, email: &str) -> Option<&Attendee> {
        let wanted = email.to_lowercase();
        self.attendees
            .iter()
            .find(|a| a.email.to_lowercase() == wanted)
    }

    /// Catalog event with the given id.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// `Registered` bookings held by an attendee, in store order.
    pub fn active_bookings_for<'a>(
        &'a self,
        attendee_id: &'a AttendeeId,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| b.is_active() && &b.attendee_id == attendee_id)
    }

    /// All bookings (any status) held by an attendee, in store order.
    pub fn bookings_for<'a>(
        &'a self,
        attendee_id: &'a AttendeeId,
    ) -> impl Iterator<Item = &'a Booking> + 'a {
        self.bookings
            .iter()
            .filter(move |b| &b.attendee_id == attendee_id)
    }

    /// Position of the `Registered` booking linking an attendee and an event.
    #[must_use]
    pub fn active_booking_index(&self, attendee_id: &AttendeeId, event_id: &EventId) -> Option<usize> {
        self.bookings
            .iter()
            .position(|b| b.is_active() && b.links(attendee_id, event_id))
    }

    /// Number of `Registered` bookings for an event.
    #[must_use]
    pub fn registered_count(&self, event_id: &EventId) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.is_active() && &b.event_id == event_id)
            .count()
    }

    /// Next attendee id: one past the highest sequence number already issued.
    #[must_use]
    pub fn next_attendee_id(&self) -> AttendeeId {
        let highest = self
            .attendees
            .iter()
            .filter_map(|a| a.id.sequence())
            .max()
            .unwrap_or(0);
        AttendeeId::from_sequence(highest.saturating_add(1))
    }

    /// Next booking id: one past the highest sequence number already issued.
    #[must_use]
    pub fn next_booking_id(&self) -> BookingId {
        let highest = self
            .bookings
            .iter()
            .filter_map(|b| b.id.sequence())
            .max()
            .unwrap_or(0);
        BookingId::from_sequence(highest.saturating_add(1))
    }
}
