//! Booking engine flow tests.
//!
//! Each test drives the engine through a complete flow against the in-memory
//! store and checks both the returned outcome and the rows left behind.
//!
//! Run with: `cargo test --test booking_engine_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use booking::{
    BookingEngine, CancellationOutcome, ConflictCheck, EngineError, RegistrationOutcome,
    SeatsLeft, SignupOutcome,
};
use booking_core::record_store::StoreError;
use booking_core::types::{Attendee, AttendeeId, Booking, BookingId, BookingStatus, EventId};
use booking_testing::{FailingRecordStore, InMemoryRecordStore, sample_catalog};
use std::sync::Arc;

fn setup() -> (InMemoryRecordStore, BookingEngine) {
    let store = InMemoryRecordStore::with_events(sample_catalog());
    let engine = BookingEngine::new(Arc::new(store.clone()));
    (store, engine)
}

async fn seats(engine: &BookingEngine, event_ref: &str) -> u32 {
    engine
        .seats_left(event_ref)
        .await
        .unwrap()
        .count()
        .expect("event should resolve")
}

/// Registering twice in a row yields `Registered` then `AlreadyRegistered` and
/// exactly one booking row.
#[tokio::test]
async fn test_registration_is_idempotent() {
    println!("🧪 Idempotent registration");
    let (store, engine) = setup();

    let first = engine.register("Ada", "ada@example.com", "Art & Design Expo").await.unwrap();
    let second = engine.register("Ada", "ada@example.com", "art & design expo").await.unwrap();

    let booking_id = first.booking_id().cloned().expect("first call registers");
    match second {
        RegistrationOutcome::AlreadyRegistered { booking_id: existing, .. } => {
            assert_eq!(existing, booking_id);
        }
        other => panic!("expected AlreadyRegistered, got {other:?}"),
    }
    assert_eq!(store.bookings().len(), 1);
    assert_eq!(store.attendees().len(), 1);
    println!("  ✅ One booking row: {booking_id}");
}

/// A same-date booking always wins over free seats.
#[tokio::test]
async fn test_conflict_takes_precedence_over_free_seats() {
    let (store, engine) = setup();

    engine.register("Ada", "ada@example.com", "TechFest 2025").await.unwrap();
    let outcome = engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap();

    match outcome {
        RegistrationOutcome::ConflictRejected { conflicts } => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].event_name, "TechFest 2025");
        }
        other => panic!("expected ConflictRejected, got {other:?}"),
    }
    assert_eq!(seats(&engine, "AI Summit").await, 50);
    assert_eq!(store.bookings().len(), 1);
}

/// The conflict check is also exposed on its own.
#[tokio::test]
async fn test_detect_conflict_reports_same_day_booking() {
    let (_, engine) = setup();
    engine.register("Ada", "ada@example.com", "TechFest 2025").await.unwrap();

    let check = engine.detect_conflict("ada@example.com", "AI Summit").await.unwrap();
    assert!(check.has_conflict());

    let unknown = engine.detect_conflict("bob@example.com", "AI Summit").await.unwrap();
    assert!(!unknown.has_conflict());

    let missing = engine.detect_conflict("ada@example.com", "AI Sumit").await.unwrap();
    assert!(matches!(missing, ConflictCheck::EventNotFound { .. }));
}

/// Capacity 1: full after one booking, free again after cancel, and someone
/// else can then register.
#[tokio::test]
async fn test_cancel_frees_a_seat() {
    println!("🧪 Cancel frees a seat");
    let (store, engine) = setup();

    engine.register("Ada", "ada@example.com", "Startup Pitch Night").await.unwrap();
    assert_eq!(seats(&engine, "Startup Pitch Night").await, 0);

    let bob_early = engine.register("Bob", "bob@example.com", "Startup Pitch Night").await.unwrap();
    assert_eq!(
        bob_early,
        RegistrationOutcome::Full {
            event_name: "Startup Pitch Night".to_string(),
            waitlisted: true,
        }
    );

    let canceled = engine.cancel("ada@example.com", "Startup Pitch Night").await.unwrap();
    assert!(matches!(canceled, CancellationOutcome::Canceled { freed_seat: true, .. }));
    assert_eq!(seats(&engine, "Startup Pitch Night").await, 1);

    let bob = engine.register("Bob", "bob@example.com", "Startup Pitch Night").await.unwrap();
    assert!(bob.is_registered());

    let statuses: Vec<BookingStatus> = store.bookings().iter().map(|b| b.status).collect();
    assert_eq!(statuses, [BookingStatus::Canceled, BookingStatus::Registered]);
    println!("  ✅ Seat released and re-booked");
}

/// A misspelt event name comes back with suggestions.
#[tokio::test]
async fn test_fuzzy_suggestion_on_miss() {
    let (store, engine) = setup();

    let outcome = engine.register("Ada", "ada@example.com", "TechFset").await.unwrap();

    match outcome {
        RegistrationOutcome::EventNotFound { query, suggestions } => {
            assert_eq!(query, "TechFset");
            assert!(suggestions.iter().any(|s| s == "TechFest 2025"));
            assert!(suggestions.len() <= 3);
        }
        other => panic!("expected EventNotFound, got {other:?}"),
    }
    assert!(store.attendees().is_empty());
}

/// Blank inputs are reported by name and nothing is written.
#[tokio::test]
async fn test_missing_fields() {
    let (store, engine) = setup();

    let outcome = engine.register("  ", "ada@example.com", "").await.unwrap();
    assert_eq!(
        outcome,
        RegistrationOutcome::MissingFields {
            fields: vec!["name", "event"]
        }
    );
    assert_eq!(store.save_count(), 0);
}

/// Full events reject before an attendee row is created.
#[tokio::test]
async fn test_full_event_creates_no_attendee() {
    let (store, engine) = setup();
    engine.register("Ada", "ada@example.com", "Startup Pitch Night").await.unwrap();

    let outcome = engine.register("Bob", "bob@example.com", "Startup Pitch Night").await.unwrap();
    assert!(matches!(outcome, RegistrationOutcome::Full { .. }));
    assert_eq!(store.attendees().len(), 1);
}

/// Cancel-then-rebook appends a new row and leaves the old one as history.
#[tokio::test]
async fn test_rebook_after_cancel_creates_new_row() {
    let (store, engine) = setup();

    engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap();
    engine.cancel("ada@example.com", "AI Summit").await.unwrap();
    let again = engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap();

    assert_eq!(again.booking_id().map(BookingId::as_str), Some("B002"));
    let bookings = store.bookings();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].status, BookingStatus::Canceled);
    assert_eq!(bookings[1].status, BookingStatus::Registered);

    // A second cancel finds the new active row, not the old canceled one
    let canceled = engine.cancel("ada@example.com", "AI Summit").await.unwrap();
    match canceled {
        CancellationOutcome::Canceled { booking_id, .. } => assert_eq!(booking_id.as_str(), "B002"),
        other => panic!("expected Canceled, got {other:?}"),
    }
    let third = engine.cancel("ada@example.com", "AI Summit").await.unwrap();
    assert!(matches!(third, CancellationOutcome::NoActiveBooking { .. }));
}

/// Cancellation gates: unknown attendee before unknown event.
#[tokio::test]
async fn test_cancel_rejections() {
    let (_, engine) = setup();

    let unknown = engine.cancel("ghost@example.com", "Nowhere").await.unwrap();
    assert_eq!(
        unknown,
        CancellationOutcome::AttendeeNotFound {
            email: "ghost@example.com".to_string()
        }
    );

    engine.sign_up("Ada", "ada@example.com").await.unwrap();
    let no_event = engine.cancel("ada@example.com", "AI Sumit").await.unwrap();
    assert!(matches!(no_event, CancellationOutcome::EventNotFound { .. }));

    let nothing = engine.cancel("ada@example.com", "AI Summit").await.unwrap();
    assert_eq!(
        nothing,
        CancellationOutcome::NoActiveBooking {
            event_name: "AI Summit".to_string()
        }
    );
}

/// Existing-attendee lookup on registration is case-sensitive; signup and login are not.
#[tokio::test]
async fn test_email_case_rules() {
    let (store, engine) = setup();

    let created = engine.sign_up("Ada", "Ada@Example.com").await.unwrap();
    assert!(matches!(created, SignupOutcome::Created { .. }));

    let taken = engine.sign_up("Ada", "ada@example.com").await.unwrap();
    assert!(matches!(taken, SignupOutcome::EmailTaken { .. }));

    // Registration with the exact email reuses the signed-up attendee
    let outcome = engine.register("Ada", "Ada@Example.com", "AI Summit").await.unwrap();
    match outcome {
        RegistrationOutcome::Registered { attendee_id, .. } => assert_eq!(attendee_id.as_str(), "A001"),
        other => panic!("expected Registered, got {other:?}"),
    }
    assert_eq!(store.attendees().len(), 1);

    let login = engine.queries().find_attendee("ada@example.com").await.unwrap().unwrap();
    assert_eq!(login.id.as_str(), "A001");
}

/// Ids continue past rows that were written by something else.
#[tokio::test]
async fn test_ids_continue_after_seeded_rows() {
    let (store, engine) = setup();
    store.seed_attendees(vec![Attendee {
        id: AttendeeId::from_sequence(41),
        name: "Legacy".to_string(),
        email: "legacy@example.com".to_string(),
    }]);
    store.seed_bookings(vec![Booking::registered(
        BookingId::from_sequence(9),
        AttendeeId::from_sequence(41),
        EventId::new("E005"),
    )]);

    let outcome = engine.register("Ada", "ada@example.com", "E005").await.unwrap();
    match outcome {
        RegistrationOutcome::Registered { booking_id, attendee_id, .. } => {
            assert_eq!(attendee_id.as_str(), "A042");
            assert_eq!(booking_id.as_str(), "B010");
        }
        other => panic!("expected Registered, got {other:?}"),
    }
}

/// Seats-left on an unknown event carries suggestions instead of a number.
#[tokio::test]
async fn test_seats_left_unknown_event() {
    let (_, engine) = setup();
    let outcome = engine.seats_left("Art and Design Expo").await.unwrap();
    match outcome {
        SeatsLeft::EventNotFound { suggestions, .. } => {
            assert_eq!(suggestions.first().map(String::as_str), Some("Art & Design Expo"));
        }
        other @ SeatsLeft::Available { .. } => panic!("expected EventNotFound, got {other:?}"),
    }
}

/// Store failures are errors, not outcomes.
#[tokio::test]
async fn test_store_errors_propagate() {
    let failing = FailingRecordStore::new(InMemoryRecordStore::with_events(sample_catalog()));
    let engine = BookingEngine::new(Arc::new(failing.clone()));

    failing.fail_reads(true);
    let err = engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap_err();
    assert!(matches!(err, EngineError::Store(StoreError::Unavailable(_))));

    failing.fail_reads(false);
    failing.fail_writes(true);
    let err = engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap_err();
    assert!(matches!(err, EngineError::Store(StoreError::Io(_))));
    assert!(failing.inner().bookings().is_empty());
}

/// A failed booking write leaves no booking behind, and the next attempt succeeds.
#[tokio::test]
async fn test_failed_booking_write_recovers() {
    let inner = InMemoryRecordStore::with_events(sample_catalog());
    let failing = FailingRecordStore::new(inner.clone());
    let engine = BookingEngine::new(Arc::new(failing.clone()));

    // Attendee write goes through, then bookings start failing
    engine.sign_up("Ada", "ada@example.com").await.unwrap();
    failing.fail_writes(true);
    assert!(engine.register("Ada", "ada@example.com", "AI Summit").await.is_err());

    failing.fail_writes(false);
    assert_eq!(inner.attendees().len(), 1);
    let outcome = engine.register("Ada", "ada@example.com", "AI Summit").await.unwrap();
    assert!(outcome.is_registered());
}

/// Query surface reflects engine writes.
#[tokio::test]
async fn test_queries_follow_engine_writes() {
    let (_, engine) = setup();
    let queries = engine.queries();

    engine.register("Ada", "ada@example.com", "Art & Design Expo").await.unwrap();
    engine.register("Ada", "ada@example.com", "TechFest 2025").await.unwrap();
    engine.cancel("ada@example.com", "Art & Design Expo").await.unwrap();

    let active = queries.active_bookings("ada@example.com").await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event_name, "TechFest 2025");

    let stats = queries.attendee_stats("ada@example.com").await.unwrap();
    assert_eq!((stats.active, stats.total), (1, 2));

    let ada = queries.find_attendee("ada@example.com").await.unwrap().unwrap();
    assert_eq!(ada.id.as_str(), "A001");
}
