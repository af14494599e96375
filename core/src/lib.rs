//! # Booking Core
//!
//! Core types and traits for the booking consistency engine.
//!
//! This crate provides the fundamental vocabulary shared by every other crate in
//! the workspace:
//!
//! - **Records**: [`types::Event`], [`types::Attendee`], [`types::Booking`]
//! - **Identifiers**: sequence-backed ids (`A001`, `B042`) plus opaque event ids
//! - **Record Store**: the narrow persistence contract the engine is written against
//! - **Environment**: injected dependencies such as the [`environment::Clock`]
//!
//! ## Architecture Principles
//!
//! - The engine never prescribes an encoding; stores implement [`record_store::RecordStore`]
//! - Bookings are never deleted, only status-transitioned
//! - Events are a read-only catalog supplied by the store
//! - Dependency injection via traits so tests can swap in deterministic mocks
//!
//! ## Example
//!
//! ```
//! use booking_core::types::{AttendeeId, BookingId, BookingStatus};
//!
//! let attendee = AttendeeId::from_sequence(7);
//! assert_eq!(attendee.as_str(), "A007");
//! assert_eq!(attendee.sequence(), Some(7));
//!
//! let booking = BookingId::from_sequence(1234);
//! assert_eq!(booking.as_str(), "B1234");
//!
//! assert!(BookingStatus::Registered.is_active());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Re-export commonly used types
pub use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod record_store;
pub mod types;

/// Environment module - Dependency injection traits
///
/// All external dependencies that affect observable behaviour (currently only time)
/// are abstracted behind traits and injected into the components that need them.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(fixed_time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall-clock implementation of [`Clock`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
