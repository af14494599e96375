//! Application wiring.
//!
//! Builds the record store, engine, query surface and advisor from a [`crate::Config`]
//! so binaries only have to hand over configuration.

mod coordinator;

pub use coordinator::{AppError, BookingApp};
