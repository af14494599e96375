//! Booking Consistency Engine - event capacity, registration and cancellation
//!
//! Manages registrations for a fixed event catalog while protecting the invariants
//! that matter when many people book at once:
//!
//! - **No overbooking**: `Registered` bookings never exceed an event's capacity
//! - **No double booking**: one active booking per attendee/event pair
//! - **No same-day clashes**: one active booking per attendee per calendar date
//! - **Deterministic ids**: `A001`, `B001`, ... minted inside the writer critical section
//!
//! # Architecture
//!
//! ```text
//! Write Side:
//! ┌──────────────────────────────────────────────────────────┐
//! │                    BookingEngine                         │
//! │  register / cancel / sign_up   (single writer lock)      │
//! │                                                          │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐    │
//! │  │ EventCatalog │  │  Conflict    │  │  Capacity    │    │
//! │  │ (+ "did you  │  │  Detector    │  │   Index      │    │
//! │  │    mean")    │  │ (same date)  │  │ (seats left) │    │
//! │  └──────────────┘  └──────────────┘  └──────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                    full-collection saves
//!                              ▼
//!                     ┌─────────────────┐
//!                     │   RecordStore   │
//!                     │ (JSON files or  │
//!                     │   in-memory)    │
//!                     └─────────────────┘
//!                              │
//!                     lock-free snapshots
//!                              ▼
//! Read Side:
//! ┌──────────────┐  ┌──────────────┐
//! │ QuerySurface │  │   Advisor    │
//! │ (bookings,   │  │ (utilisation,│
//! │  seat report)│  │  reminders)  │
//! └──────────────┘  └──────────────┘
//! ```
//!
//! # Key Features
//!
//! ## 1. Gated Registration
//!
//! ```text
//! missing fields → unknown event → same-date conflict → full → already registered
//!                                                       │
//!                                          Full { waitlisted: true }
//! ```
//!
//! Each gate short-circuits with a terminal outcome. Only record store failures are
//! errors.
//!
//! ## 2. Race-Free Seats
//!
//! Two callers racing for the last seat both pass the lock-free pre-check, but only
//! one wins inside the critical section; the other sees `Full`.
//!
//! ## 3. Append-Only History
//!
//! Cancellation flips a booking to `Canceled` and keeps the row. Re-booking creates
//! a new row, so each attendee/event pair carries its full history.
//!
//! # Usage
//!
//! See [`engine::BookingEngine`] for the write operations and
//! [`queries::QuerySurface`] for projections.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod advisory;
pub mod app;
pub mod capacity;
pub mod catalog;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod metrics;
pub mod outcome;
pub mod queries;
pub mod similarity;
pub mod snapshot;

pub use advisory::Advisor;
pub use app::BookingApp;
pub use config::Config;
pub use engine::{BookingEngine, EngineError};
pub use outcome::{CancellationOutcome, ConflictCheck, RegistrationOutcome, SeatsLeft, SignupOutcome};
pub use queries::QuerySurface;
