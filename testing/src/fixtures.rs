//! Catalog fixtures and builders
//!
//! Events are a fixed catalog supplied by the record store, so most tests start by
//! building one. [`EventBuilder`] keeps those setups short and readable.

#![allow(clippy::module_name_repetitions)]

use booking_core::types::{Capacity, Event, EventId};
use chrono::{NaiveDate, NaiveTime};

/// Fluent builder for catalog events
///
/// Defaults: date 2025-03-14, time 10:00, venue "Main Hall", capacity 10.
///
/// # Example
///
/// ```
/// use booking_testing::EventBuilder;
///
/// let event = EventBuilder::new("E001", "TechFest 2025")
///     .on(2025, 3, 14)
///     .at(9, 30)
///     .capacity(1)
///     .build();
///
/// assert_eq!(event.capacity.value(), 1);
/// assert_eq!(event.venue, "Main Hall");
/// ```
#[derive(Debug, Clone)]
pub struct EventBuilder {
    id: String,
    name: String,
    date: (i32, u32, u32),
    time: (u32, u32),
    venue: String,
    capacity: u32,
}

impl EventBuilder {
    /// Start building an event with the given id and display name
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: (2025, 3, 14),
            time: (10, 0),
            venue: "Main Hall".to_string(),
            capacity: 10,
        }
    }

    /// Set the calendar date
    #[must_use]
    pub const fn on(mut self, year: i32, month: u32, day: u32) -> Self {
        self.date = (year, month, day);
        self
    }

    /// Set the start time
    #[must_use]
    pub const fn at(mut self, hour: u32, minute: u32) -> Self {
        self.time = (hour, minute);
        self
    }

    /// Set the venue
    #[must_use]
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Set the seat limit
    #[must_use]
    pub const fn capacity(mut self, seats: u32) -> Self {
        self.capacity = seats;
        self
    }

    /// Build the event
    ///
    /// # Panics
    ///
    /// Panics if the configured date or time is not a valid calendar value.
    #[must_use]
    #[allow(clippy::expect_used)] // Fixture values are chosen by the test author
    pub fn build(self) -> Event {
        let (year, month, day) = self.date;
        let (hour, minute) = self.time;
        Event {
            id: EventId::new(self.id),
            name: self.name,
            date: NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid"),
            time: NaiveTime::from_hms_opt(hour, minute, 0).expect("fixture time must be valid"),
            venue: self.venue,
            capacity: Capacity::new(self.capacity),
        }
    }
}

/// A small catalog covering the interesting cases:
///
/// | id   | name                      | date       | time  | capacity |
/// |------|---------------------------|------------|-------|----------|
/// | E001 | TechFest 2025             | 2025-03-14 | 10:00 | 100      |
/// | E002 | AI Summit                 | 2025-03-14 | 15:00 | 50       |
/// | E003 | Startup Pitch Night       | 2025-04-02 | 19:00 | 1        |
/// | E004 | Art & Design Expo         | 2025-05-10 | 11:00 | 3        |
/// | E005 | Business Leadership Forum | 2025-06-20 | 09:00 | 2        |
///
/// E001 and E002 share a date, so holding one conflicts with the other.
#[must_use]
pub fn sample_catalog() -> Vec<Event> {
    vec![
        EventBuilder::new("E001", "TechFest 2025")
            .on(2025, 3, 14)
            .at(10, 0)
            .venue("Convention Center")
            .capacity(100)
            .build(),
        EventBuilder::new("E002", "AI Summit")
            .on(2025, 3, 14)
            .at(15, 0)
            .venue("Innovation Hub")
            .capacity(50)
            .build(),
        EventBuilder::new("E003", "Startup Pitch Night")
            .on(2025, 4, 2)
            .at(19, 0)
            .venue("Rooftop Lounge")
            .capacity(1)
            .build(),
        EventBuilder::new("E004", "Art & Design Expo")
            .on(2025, 5, 10)
            .at(11, 0)
            .venue("City Gallery")
            .capacity(3)
            .build(),
        EventBuilder::new("E005", "Business Leadership Forum")
            .on(2025, 6, 20)
            .at(9, 0)
            .venue("Grand Hotel")
            .capacity(2)
            .build(),
    ]
}
