//! Business metrics for the booking engine.
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `booking_registrations_total{outcome}` - Registration attempts by outcome
//! - `booking_cancellations_total{outcome}` - Cancellation attempts by outcome
//! - `booking_attendees_created_total` - Attendee rows created
//! - `booking_invariant_violations_total{kind}` - Capacity invariant breaches observed
//!
//! ## Gauges
//! - `booking_seats_left{event_id}` - Seats left after the last committed change

use metrics::{describe_counter, describe_gauge};

/// Initialize and register all business metrics descriptions.
///
/// This should be called once at application startup, before any metrics are recorded.
pub fn register_booking_metrics() {
    describe_counter!(
        "booking_registrations_total",
        "Registration attempts by outcome (registered, conflict, full, already_registered, ...)"
    );
    describe_counter!(
        "booking_cancellations_total",
        "Cancellation attempts by outcome (canceled, no_active_booking, ...)"
    );
    describe_counter!(
        "booking_attendees_created_total",
        "Attendee records created by registration or signup"
    );
    describe_counter!(
        "booking_invariant_violations_total",
        "Observed breaches of the capacity invariant (should stay at zero)"
    );
    describe_gauge!(
        "booking_seats_left",
        "Seats left for an event after the last committed change"
    );
    describe_counter!(
        "booking_store_writes_total",
        "Whole-collection writes performed by the file record store"
    );

    tracing::info!("Booking metrics registered");
}

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record the outcome of a registration attempt.
pub fn record_registration(outcome: &'static str) {
    metrics::counter!("booking_registrations_total", "outcome" => outcome).increment(1);
    tracing::debug!(outcome, "Recorded registration metric");
}

/// Record the outcome of a cancellation attempt.
pub fn record_cancellation(outcome: &'static str) {
    metrics::counter!("booking_cancellations_total", "outcome" => outcome).increment(1);
    tracing::debug!(outcome, "Recorded cancellation metric");
}

/// Record a newly created attendee row.
pub fn record_attendee_created() {
    metrics::counter!("booking_attendees_created_total").increment(1);
}

/// Record a capacity invariant breach (more registrations than seats).
pub fn record_invariant_violation(kind: &'static str) {
    metrics::counter!("booking_invariant_violations_total", "kind" => kind).increment(1);
}

/// Update the seats-left gauge for an event.
///
/// # Arguments
///
/// * `event_id` - Event ID as string
/// * `seats_left` - Seats left after the change
pub fn update_seats_left(event_id: &str, seats_left: u32) {
    metrics::gauge!("booking_seats_left", "event_id" => event_id.to_owned())
        .set(f64::from(seats_left));
    tracing::debug!(event_id, seats_left, "Updated seats_left metric");
}
