//! Booking Engine Demo
//!
//! Walks through the engine against a JSON data directory:
//! - Catalog seeding on first run
//! - Registration, same-day conflict and full-event waitlisting
//! - Cancellation freeing a seat
//! - Query and advisory projections
//!
//! # Usage
//!
//! ```bash
//! BOOKING_DATA_DIR=/tmp/booking-demo cargo run --bin booking-demo
//! ```

use anyhow::{Context, Result};
use booking::{BookingApp, Config, metrics};
use booking_core::types::{Capacity, Event, EventId};
use chrono::{NaiveDate, NaiveTime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn event(
    id: &str,
    name: &str,
    (year, month, day): (i32, u32, u32),
    (hour, minute): (u32, u32),
    venue: &str,
    seats: u32,
) -> Result<Event> {
    Ok(Event {
        id: EventId::new(id),
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("invalid date for {name}"))?,
        time: NaiveTime::from_hms_opt(hour, minute, 0)
            .with_context(|| format!("invalid time for {name}"))?,
        venue: venue.to_string(),
        capacity: Capacity::new(seats),
    })
}

fn demo_catalog() -> Result<Vec<Event>> {
    Ok(vec![
        event("E001", "TechFest 2025", (2025, 3, 14), (10, 0), "Convention Center", 100)?,
        event("E002", "AI Summit", (2025, 3, 14), (15, 0), "Innovation Hub", 50)?,
        event("E003", "Startup Pitch Night", (2025, 4, 2), (19, 0), "Rooftop Lounge", 1)?,
        event("E004", "Art & Design Expo", (2025, 5, 10), (11, 0), "City Gallery", 3)?,
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    metrics::register_booking_metrics();

    println!("\n🎟️  ============================================");
    println!("   Booking Engine - Live Demo");
    println!("============================================\n");

    println!("⚙️  Initializing application...");
    let app = BookingApp::new(config).await?;
    println!("   ✓ Data directory: {}", app.config().store.data_dir.display());
    if app.seed_catalog(&demo_catalog()?).await? {
        println!("   ✓ Catalog seeded");
    }
    println!("✓ Application ready\n");

    // Step 1: register
    println!("1️⃣  Ada registers for TechFest...");
    let outcome = app.engine.register("Ada", "ada@example.com", "techfest 2025").await?;
    println!("   {outcome}\n");

    // Step 2: same-day conflict
    println!("2️⃣  Ada tries the AI Summit on the same day...");
    let outcome = app.engine.register("Ada", "ada@example.com", "AI Summit").await?;
    println!("   {outcome}\n");

    // Step 3: typo
    println!("3️⃣  Bob misspells the event...");
    let outcome = app.engine.register("Bob", "bob@example.com", "Startup Pich Night").await?;
    println!("   {outcome}\n");

    // Step 4: last seat, then full
    println!("4️⃣  Bob and Cy compete for the last pitch-night seat...");
    let bob = app.engine.register("Bob", "bob@example.com", "Startup Pitch Night").await?;
    let cy = app.engine.register("Cy", "cy@example.com", "Startup Pitch Night").await?;
    println!("   Bob: {bob}");
    println!("   Cy:  {cy}\n");

    // Step 5: cancel frees the seat
    println!("5️⃣  Bob cancels...");
    let outcome = app.engine.cancel("bob@example.com", "Startup Pitch Night").await?;
    println!("   {outcome}");
    let seats = app.engine.seats_left("Startup Pitch Night").await?;
    println!("   {seats}\n");

    // Step 6: projections
    println!("6️⃣  Final State:");
    for row in app.queries.seat_report().await? {
        println!(
            "   📊 {:<22} {} / {} seats left",
            row.event.name, row.seats.seats_left, row.seats.capacity
        );
    }
    for booking in app.queries.active_bookings("ada@example.com").await? {
        println!(
            "   📅 Ada: {} on {} at {} ({})",
            booking.event_name,
            booking.date,
            booking.time.format("%H:%M"),
            booking.venue
        );
    }
    for entry in app.advisor.utilization_report().await? {
        println!(
            "   💡 {} is {:?} ({:.0}% taken)",
            entry.event_name, entry.flag, entry.utilization_pct
        );
    }

    println!("\n✨ Demo completed successfully!");
    Ok(())
}
