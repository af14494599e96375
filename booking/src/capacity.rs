//! Seat accounting.
//!
//! Seats left is always derived: capacity minus the number of `Registered` bookings
//! for the event. Nothing is cached, so the figure can never drift from the rows.

use crate::metrics;
use crate::snapshot::StoreSnapshot;
use booking_core::types::Event;
use serde::Serialize;

/// Seat figures for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatCount {
    /// Seat limit from the catalog
    pub capacity: u32,
    /// Number of `Registered` bookings
    pub registered: usize,
    /// `capacity - registered`, never below zero
    pub seats_left: u32,
}

impl SeatCount {
    /// Whether a new registration would exceed capacity
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.seats_left == 0
    }

    /// Percentage of seats taken, `0` for zero-capacity events
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // seat counts
    pub fn utilization_pct(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.registered as f64 / f64::from(self.capacity) * 100.0
    }
}

/// Count seats for `event` against the bookings in `snapshot`.
///
/// More registrations than seats means the capacity invariant was broken upstream
/// (for example by a hand-edited store). That is logged and counted, and the result
/// is clamped so callers see a full event rather than a negative figure.
#[must_use]
pub fn seat_count(snapshot: &StoreSnapshot, event: &Event) -> SeatCount {
    let capacity = event.capacity.value();
    let registered = snapshot.registered_count(&event.id);

    let seats_left = match u32::try_from(registered) {
        Ok(taken) if taken <= capacity => capacity - taken,
        _ => {
            tracing::error!(
                event_id = %event.id,
                capacity,
                registered,
                "Event holds more registrations than seats"
            );
            metrics::record_invariant_violation("overbooked");
            0
        }
    };

    SeatCount {
        capacity,
        registered,
        seats_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::types::{AttendeeId, Booking, BookingId, BookingStatus};
    use booking_testing::EventBuilder;

    fn bookings(event: &Event, statuses: &[BookingStatus]) -> Vec<Booking> {
        statuses
            .iter()
            .enumerate()
            .map(|(n, status)| Booking {
                id: BookingId::from_sequence(u32::try_from(n + 1).unwrap_or(u32::MAX)),
                attendee_id: AttendeeId::from_sequence(u32::try_from(n + 1).unwrap_or(u32::MAX)),
                event_id: event.id.clone(),
                status: *status,
            })
            .collect()
    }

    #[test]
    fn canceled_rows_do_not_take_seats() {
        let event = EventBuilder::new("E1", "Meetup").capacity(3).build();
        let snapshot = StoreSnapshot {
            bookings: bookings(
                &event,
                &[BookingStatus::Registered, BookingStatus::Canceled, BookingStatus::Registered],
            ),
            events: vec![event.clone()],
            ..StoreSnapshot::default()
        };

        let count = seat_count(&snapshot, &event);
        assert_eq!(count.registered, 2);
        assert_eq!(count.seats_left, 1);
        assert!(!count.is_full());
    }

    #[test]
    fn overbooked_store_clamps_to_zero() {
        let event = EventBuilder::new("E1", "Meetup").capacity(1).build();
        let snapshot = StoreSnapshot {
            bookings: bookings(&event, &[BookingStatus::Registered, BookingStatus::Registered]),
            events: vec![event.clone()],
            ..StoreSnapshot::default()
        };

        let count = seat_count(&snapshot, &event);
        assert_eq!(count.seats_left, 0);
        assert!(count.is_full());
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let event = EventBuilder::new("E1", "Closed").capacity(0).build();
        let count = seat_count(&StoreSnapshot::default(), &event);
        assert!(count.is_full());
        assert!(count.utilization_pct().abs() < f64::EPSILON);
    }
}
