//! # Booking Testing
//!
//! Testing utilities and helpers for the booking consistency engine.
//!
//! This crate provides:
//! - Mock implementations of the Record Store and the Clock
//! - Catalog fixtures and builders
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use booking_testing::{InMemoryRecordStore, sample_catalog};
//!
//! #[tokio::test]
//! async fn test_registration_flow() {
//!     let store = Arc::new(InMemoryRecordStore::with_events(sample_catalog()));
//!     let engine = BookingEngine::new(store.clone());
//!
//!     let outcome = engine.register("Ada", "ada@example.com", "TechFest 2025").await?;
//!     assert!(outcome.is_registered());
//!     assert_eq!(store.bookings().len(), 1);
//! }
//! ```

use booking_core::environment::Clock;
use chrono::{DateTime, Utc};

pub mod fixtures;
pub mod store_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use booking_testing::mocks::FixedClock;
    /// use booking_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing utilities
///
/// Strategies for generating attendee identities and operation scripts that drive
/// the engine through random interleavings of registrations and cancellations.
pub mod properties {
    use proptest::prelude::*;

    /// A single step of a randomly generated booking script
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ScriptStep {
        /// Register attendee `attendee` (index into a fixed pool) for event `event`
        Register {
            /// Attendee pool index
            attendee: usize,
            /// Catalog index
            event: usize,
        },
        /// Cancel attendee `attendee`'s booking for event `event`
        Cancel {
            /// Attendee pool index
            attendee: usize,
            /// Catalog index
            event: usize,
        },
    }

    /// Strategy for plausible, non-empty email addresses
    pub fn email() -> impl Strategy<Value = String> {
        ("[a-z]{1,8}", "[a-z]{2,6}").prop_map(|(user, domain)| format!("{user}@{domain}.test"))
    }

    /// Strategy for one script step over `attendees` people and `events` catalog rows
    pub fn script_step(attendees: usize, events: usize) -> impl Strategy<Value = ScriptStep> {
        prop_oneof![
            3 => (0..attendees, 0..events)
                .prop_map(|(attendee, event)| ScriptStep::Register { attendee, event }),
            1 => (0..attendees, 0..events)
                .prop_map(|(attendee, event)| ScriptStep::Cancel { attendee, event }),
        ]
    }

    /// Strategy for a script of up to `max_len` steps
    pub fn script(
        attendees: usize,
        events: usize,
        max_len: usize,
    ) -> impl Strategy<Value = Vec<ScriptStep>> {
        prop::collection::vec(script_step(attendees, events), 1..max_len)
    }
}

// Re-export commonly used items
pub use fixtures::{EventBuilder, sample_catalog};
pub use mocks::{FixedClock, test_clock};
pub use store_mocks::{FailingRecordStore, InMemoryRecordStore};
