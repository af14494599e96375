//! Domain types for the booking consistency engine.
//!
//! This module contains the three record kinds the engine manages (events, attendees,
//! bookings), their identifiers, and the small value objects they are built from.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Width of the zero-padded numeric part of sequence-backed ids (`A001`).
const SEQUENCE_WIDTH: usize = 3;

fn format_sequence(prefix: char, sequence: u32) -> String {
    format!("{prefix}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

fn parse_sequence(prefix: char, raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Identifier of an event in the catalog.
///
/// Event ids are supplied by the record store; the engine never mints them.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an `EventId` from any string-like value
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an attendee (`A` followed by a zero-padded sequence number).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendeeId(String);

impl AttendeeId {
    /// Prefix shared by every minted attendee id
    pub const PREFIX: char = 'A';

    /// Wraps an existing identifier (e.g. one read back from a store)
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints the id for the given sequence number (`7` becomes `A007`)
    #[must_use]
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format_sequence(Self::PREFIX, sequence))
    }

    /// Numeric part of a minted id, `None` for ids that do not follow the scheme
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        parse_sequence(Self::PREFIX, &self.0)
    }

    /// Get the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a booking (`B` followed by a zero-padded sequence number).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Prefix shared by every minted booking id
    pub const PREFIX: char = 'B';

    /// Wraps an existing identifier (e.g. one read back from a store)
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints the id for the given sequence number (`12` becomes `B012`)
    #[must_use]
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format_sequence(Self::PREFIX, sequence))
    }

    /// Numeric part of a minted id, `None` for ids that do not follow the scheme
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        parse_sequence(Self::PREFIX, &self.0)
    }

    /// Get the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Capacity
// ============================================================================

/// Maximum number of simultaneously registered attendees for an event
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(pub u32);

impl Capacity {
    /// Creates a new `Capacity`
    #[must_use]
    pub const fn new(seats: u32) -> Self {
        Self(seats)
    }

    /// Number of seats
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Records
// ============================================================================

/// An entry in the event catalog.
///
/// Events are immutable from the engine's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Catalog identifier
    pub id: EventId,
    /// Display name, matched case-insensitively by callers
    pub name: String,
    /// Calendar day the event takes place on
    pub date: NaiveDate,
    /// Start time
    pub time: NaiveTime,
    /// Where it happens
    pub venue: String,
    /// Seat limit for `Registered` bookings
    pub capacity: Capacity,
}

/// A person who can hold bookings. The email is the natural key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Minted identifier
    pub id: AttendeeId,
    /// Display name as first supplied
    pub name: String,
    /// Email, stored case-preserving
    pub email: String,
}

/// Status of a booking row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Holding a seat
    Registered,
    /// Seat released; the row stays as history
    Canceled,
}

impl BookingStatus {
    /// Whether this status occupies a seat
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Registered)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => f.write_str("Registered"),
            Self::Canceled => f.write_str("Canceled"),
        }
    }
}

/// Link between an attendee and an event.
///
/// Rows are appended on registration and flipped to [`BookingStatus::Canceled`] on
/// cancellation; they are never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Minted identifier
    pub id: BookingId,
    /// Who holds the booking
    pub attendee_id: AttendeeId,
    /// Which event it is for
    pub event_id: EventId,
    /// Current status
    pub status: BookingStatus,
}

impl Booking {
    /// Creates a new booking in the `Registered` state
    #[must_use]
    pub const fn registered(id: BookingId, attendee_id: AttendeeId, event_id: EventId) -> Self {
        Self {
            id,
            attendee_id,
            event_id,
            status: BookingStatus::Registered,
        }
    }

    /// Whether this row currently occupies a seat
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether this row links the given attendee and event
    #[must_use]
    pub fn links(&self, attendee_id: &AttendeeId, event_id: &EventId) -> bool {
        &self.attendee_id == attendee_id && &self.event_id == event_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn sequence_ids_are_zero_padded() {
        assert_eq!(AttendeeId::from_sequence(1).as_str(), "A001");
        assert_eq!(AttendeeId::from_sequence(42).as_str(), "A042");
        assert_eq!(BookingId::from_sequence(999).as_str(), "B999");
        assert_eq!(BookingId::from_sequence(1000).as_str(), "B1000");
    }

    #[test]
    fn sequence_parses_back() {
        assert_eq!(AttendeeId::new("A010").sequence(), Some(10));
        assert_eq!(BookingId::new("B1000").sequence(), Some(1000));
    }

    #[test]
    fn foreign_ids_have_no_sequence() {
        assert_eq!(AttendeeId::new("guest-1").sequence(), None);
        assert_eq!(AttendeeId::new("A").sequence(), None);
        assert_eq!(BookingId::new("A001").sequence(), None);
        assert_eq!(BookingId::new("B-12").sequence(), None);
    }

    #[test]
    fn booking_status_serializes_as_plain_names() {
        let json = serde_json::to_string(&BookingStatus::Canceled).unwrap();
        assert_eq!(json, "\"Canceled\"");
        let status: BookingStatus = serde_json::from_str("\"Registered\"").unwrap();
        assert!(status.is_active());
    }

    #[test]
    fn event_date_and_time_serialize_as_text() {
        let event = Event {
            id: EventId::new("E001"),
            name: "TechFest 2025".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            venue: "Main Hall".to_string(),
            capacity: Capacity::new(100),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["date"], "2025-03-14");
        assert_eq!(json["time"], "10:30:00");
    }

    #[test]
    fn booking_links_pair() {
        let booking = Booking::registered(
            BookingId::from_sequence(1),
            AttendeeId::from_sequence(1),
            EventId::new("E001"),
        );
        assert!(booking.links(&AttendeeId::new("A001"), &EventId::new("E001")));
        assert!(!booking.links(&AttendeeId::new("A002"), &EventId::new("E001")));
    }
}
