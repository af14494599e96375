//! Same-date conflict detection.
//!
//! An attendee may hold at most one active booking per calendar date. Conflicts are
//! date-level: two events on the same day conflict regardless of their start times.

use crate::snapshot::StoreSnapshot;
use booking_core::types::{Event, EventId};
use chrono::NaiveTime;
use serde::Serialize;

/// An active booking that clashes with a candidate event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEntry {
    /// Event already booked
    pub event_id: EventId,
    /// Its display name
    pub event_name: String,
    /// Its start time
    pub time: NaiveTime,
}

/// All active bookings an attendee holds on a candidate event's date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictResult {
    /// Clashing bookings in store order
    pub conflicts: Vec<ConflictEntry>,
}

impl ConflictResult {
    /// Whether at least one clash was found
    #[must_use]
    pub fn has_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Scan `snapshot` for active bookings of the attendee with `email` (exact match) that
/// fall on the same date as `candidate`.
///
/// The candidate event itself is never reported: holding it already is a repeat
/// registration, not a clash. Unknown emails have no bookings and never conflict.
#[must_use]
pub fn detect(snapshot: &StoreSnapshot, email: &str, candidate: &Event) -> ConflictResult {
    let Some(attendee) = snapshot.attendee_by_email(email) else {
        return ConflictResult::default();
    };

    let conflicts = snapshot
        .active_bookings_for(&attendee.id)
        .filter(|booking| booking.event_id != candidate.id)
        .filter_map(|booking| snapshot.event(&booking.event_id))
        .filter(|booked| booked.date == candidate.date)
        .map(|booked| ConflictEntry {
            event_id: booked.id.clone(),
            event_name: booked.name.clone(),
            time: booked.time,
        })
        .collect();

    ConflictResult { conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::types::{Attendee, AttendeeId, Booking, BookingId, BookingStatus};
    use booking_testing::sample_catalog;

    fn snapshot_with(bookings: Vec<(&str, BookingStatus)>) -> StoreSnapshot {
        StoreSnapshot {
            events: sample_catalog(),
            attendees: vec![Attendee {
                id: AttendeeId::from_sequence(1),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }],
            bookings: bookings
                .into_iter()
                .zip(1..)
                .map(|((event, status), n)| Booking {
                    id: BookingId::from_sequence(n),
                    attendee_id: AttendeeId::from_sequence(1),
                    event_id: EventId::new(event),
                    status,
                })
                .collect(),
        }
    }

    #[test]
    fn same_date_booking_conflicts() {
        let snapshot = snapshot_with(vec![("E001", BookingStatus::Registered)]);
        let ai_summit = &snapshot.events[1];

        let result = detect(&snapshot, "ada@example.com", ai_summit);
        assert!(result.has_conflict());
        assert_eq!(result.conflicts[0].event_name, "TechFest 2025");
        assert_eq!(result.conflicts[0].time, NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default());
    }

    #[test]
    fn candidate_itself_is_not_a_conflict() {
        let snapshot = snapshot_with(vec![("E001", BookingStatus::Registered)]);
        let techfest = &snapshot.events[0];

        assert!(!detect(&snapshot, "ada@example.com", techfest).has_conflict());
    }

    #[test]
    fn canceled_and_other_dates_are_ignored() {
        let snapshot = snapshot_with(vec![
            ("E001", BookingStatus::Canceled),
            ("E003", BookingStatus::Registered),
        ]);
        let ai_summit = &snapshot.events[1];

        assert!(!detect(&snapshot, "ada@example.com", ai_summit).has_conflict());
    }

    #[test]
    fn unknown_or_differently_cased_email_never_conflicts() {
        let snapshot = snapshot_with(vec![("E001", BookingStatus::Registered)]);
        let ai_summit = &snapshot.events[1];

        assert!(!detect(&snapshot, "nobody@example.com", ai_summit).has_conflict());
        assert!(!detect(&snapshot, "ADA@example.com", ai_summit).has_conflict());
    }
}
