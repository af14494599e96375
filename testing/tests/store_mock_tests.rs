//! Tests for record store testing utilities

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use booking_core::record_store::{RecordStore, StoreError};
use booking_core::types::{Attendee, AttendeeId, Booking, BookingId, BookingStatus, EventId};
use booking_testing::{FailingRecordStore, InMemoryRecordStore, sample_catalog};
use std::sync::Arc;

fn attendee(seq: u32, email: &str) -> Attendee {
    Attendee {
        id: AttendeeId::from_sequence(seq),
        name: format!("Attendee {seq}"),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_inmemory_store_starts_empty() {
    let store = InMemoryRecordStore::new();

    assert!(store.load_events().await.unwrap().is_empty());
    assert!(store.load_attendees().await.unwrap().is_empty());
    assert!(store.load_bookings().await.unwrap().is_empty());
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn test_inmemory_store_save_overwrites_whole_collection() {
    let store = InMemoryRecordStore::with_events(sample_catalog());

    store
        .save_attendees(vec![attendee(1, "a@x.test"), attendee(2, "b@x.test")])
        .await
        .unwrap();
    store.save_attendees(vec![attendee(3, "c@x.test")]).await.unwrap();

    let attendees = store.load_attendees().await.unwrap();
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0].id.as_str(), "A003");
    assert_eq!(store.save_count(), 2);
}

#[tokio::test]
async fn test_inmemory_store_clones_share_state() {
    let store = InMemoryRecordStore::new();
    let shared: Arc<dyn RecordStore> = Arc::new(store.clone());

    shared
        .save_bookings(vec![Booking {
            id: BookingId::from_sequence(1),
            attendee_id: AttendeeId::from_sequence(1),
            event_id: EventId::new("E001"),
            status: BookingStatus::Registered,
        }])
        .await
        .unwrap();

    assert_eq!(store.bookings().len(), 1);
}

#[tokio::test]
async fn test_failing_store_rejects_writes_when_told() {
    let store = FailingRecordStore::new(InMemoryRecordStore::with_events(sample_catalog()));

    store.fail_writes(true);
    let result = store.save_attendees(vec![attendee(1, "a@x.test")]).await;
    assert!(matches!(result, Err(StoreError::Io(_))));
    assert!(store.inner().attendees().is_empty());

    store.fail_writes(false);
    store.save_attendees(vec![attendee(1, "a@x.test")]).await.unwrap();
    assert_eq!(store.inner().attendees().len(), 1);
}

#[tokio::test]
async fn test_failing_store_rejects_reads_when_told() {
    let store = FailingRecordStore::new(InMemoryRecordStore::with_events(sample_catalog()));

    store.fail_reads(true);
    assert!(matches!(
        store.load_events().await,
        Err(StoreError::Unavailable(_))
    ));

    store.fail_reads(false);
    assert_eq!(store.load_events().await.unwrap().len(), 5);
}
