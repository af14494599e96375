//! Advisory projections.
//!
//! Deterministic helpers for assistant-style features: utilisation hot spots,
//! overcommitment warnings, reminder schedules and side-by-side event comparison.
//! They only read. Anything an advisor suggests booking must still go through
//! [`crate::engine::BookingEngine::register`].

use crate::capacity::{self, SeatCount};
use crate::catalog::{EventCatalog, Resolution, Suggestions};
use crate::config::{AdvisoryConfig, LookupConfig};
use crate::engine::EngineError;
use crate::queries;
use crate::snapshot::StoreSnapshot;
use booking_core::environment::Clock;
use booking_core::record_store::RecordStore;
use booking_core::types::{BookingId, Event, EventId};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Utilisation
// ============================================================================

/// Why an event shows up in the utilisation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationFlag {
    /// Below the under-utilised threshold
    UnderUtilized,
    /// Above the near-capacity threshold
    NearCapacity,
}

/// An event outside the comfortable utilisation band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationEntry {
    /// Event id
    pub event_id: EventId,
    /// Event name
    pub event_name: String,
    /// Seat figures
    pub seats: SeatCount,
    /// Percentage of seats taken
    pub utilization_pct: f64,
    /// Which side of the band
    pub flag: UtilizationFlag,
}

// ============================================================================
// Overcommitment
// ============================================================================

/// Whether an attendee holds an unusually large number of active bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Overcommitment {
    /// Below the threshold
    Ok {
        /// Active bookings held
        active: usize,
    },
    /// At or above the threshold
    Warning {
        /// Active bookings held
        active: usize,
        /// Configured threshold
        threshold: usize,
    },
}

// ============================================================================
// Reminders
// ============================================================================

/// How long before the event start a reminder fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderLead {
    /// 24 hours before
    DayBefore,
    /// 3 hours before
    ThreeHours,
    /// 30 minutes before
    HalfHour,
}

impl ReminderLead {
    /// All leads, longest first
    pub const ALL: [Self; 3] = [Self::DayBefore, Self::ThreeHours, Self::HalfHour];

    /// Offset from the event start
    #[must_use]
    pub fn offset(self) -> Duration {
        match self {
            Self::DayBefore => Duration::hours(24),
            Self::ThreeHours => Duration::hours(3),
            Self::HalfHour => Duration::minutes(30),
        }
    }
}

/// A reminder due for one of an attendee's active bookings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Booking the reminder is for
    pub booking_id: BookingId,
    /// Event name
    pub event_name: String,
    /// Event start, interpreted as UTC
    pub event_starts_at: DateTime<Utc>,
    /// When to send it
    pub remind_at: DateTime<Utc>,
    /// Which lead produced it
    pub lead: ReminderLead,
}

// ============================================================================
// Comparison
// ============================================================================

/// Facts about one event, for side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventFacts {
    /// Event id
    pub event_id: EventId,
    /// Event name
    pub name: String,
    /// Event date
    pub date: NaiveDate,
    /// Start time
    pub time: NaiveTime,
    /// Venue
    pub venue: String,
    /// Seat figures
    pub seats: SeatCount,
}

impl EventFacts {
    fn of(snapshot: &StoreSnapshot, event: &Event) -> Self {
        Self {
            event_id: event.id.clone(),
            name: event.name.clone(),
            date: event.date,
            time: event.time,
            venue: event.venue.clone(),
            seats: capacity::seat_count(snapshot, event),
        }
    }
}

/// Result of [`Advisor::compare`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Comparison {
    /// Both references resolved
    Compared {
        /// First event
        left: EventFacts,
        /// Second event
        right: EventFacts,
    },
    /// A reference did not resolve (the first miss is reported)
    EventNotFound {
        /// Reference as supplied (trimmed)
        query: String,
        /// Closest catalog names
        suggestions: Suggestions,
    },
}

// ============================================================================
// Advisor
// ============================================================================

/// Read-only advisory projections over a record store.
pub struct Advisor {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    config: AdvisoryConfig,
    lookup: LookupConfig,
}

impl Advisor {
    /// Create an advisor with default thresholds
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            config: AdvisoryConfig::default(),
            lookup: LookupConfig::default(),
        }
    }

    /// Override thresholds
    #[must_use]
    pub fn with_config(mut self, config: AdvisoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Override suggestion settings used by [`Advisor::compare`]
    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupConfig) -> Self {
        self.lookup = lookup;
        self
    }

    async fn snapshot(&self) -> Result<StoreSnapshot, EngineError> {
        Ok(StoreSnapshot::load(self.store.as_ref()).await?)
    }

    /// Events below the under-utilised or above the near-capacity threshold, in
    /// store order. Zero-capacity events are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn utilization_report(&self) -> Result<Vec<UtilizationEntry>, EngineError> {
        let snapshot = self.snapshot().await?;
        let under = f64::from(self.config.under_utilized_pct);
        let near = f64::from(self.config.near_capacity_pct);

        Ok(queries::seat_report(&snapshot)
            .into_iter()
            .filter(|row| row.seats.capacity > 0)
            .filter_map(|row| {
                let utilization_pct = row.seats.utilization_pct();
                let flag = if utilization_pct < under {
                    UtilizationFlag::UnderUtilized
                } else if utilization_pct > near {
                    UtilizationFlag::NearCapacity
                } else {
                    return None;
                };
                Some(UtilizationEntry {
                    event_id: row.event.id,
                    event_name: row.event.name,
                    seats: row.seats,
                    utilization_pct,
                    flag,
                })
            })
            .collect())
    }

    /// Warn when `email` holds at least the configured number of active bookings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn overcommitment(&self, email: &str) -> Result<Overcommitment, EngineError> {
        let snapshot = self.snapshot().await?;
        let active = queries::active_bookings(&snapshot, email.trim()).len();
        let threshold = self.config.overcommit_threshold;

        Ok(if active >= threshold {
            tracing::debug!(active, threshold, "Attendee is overcommitted");
            Overcommitment::Warning { active, threshold }
        } else {
            Overcommitment::Ok { active }
        })
    }

    /// Upcoming reminders for `email`'s active bookings, earliest first.
    ///
    /// Each booking yields reminders 24 h, 3 h and 30 min before the event start;
    /// instants not after the clock's `now` are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn reminder_schedule(&self, email: &str) -> Result<Vec<Reminder>, EngineError> {
        let snapshot = self.snapshot().await?;
        let now = self.clock.now();

        let mut reminders: Vec<Reminder> = queries::active_bookings(&snapshot, email.trim())
            .into_iter()
            .flat_map(|booking| {
                let event_starts_at = booking.date.and_time(booking.time).and_utc();
                ReminderLead::ALL.into_iter().map(move |lead| Reminder {
                    booking_id: booking.booking_id.clone(),
                    event_name: booking.event_name.clone(),
                    event_starts_at,
                    remind_at: event_starts_at - lead.offset(),
                    lead,
                })
            })
            .filter(|reminder| reminder.remind_at > now)
            .collect();

        reminders.sort_by_key(|reminder| reminder.remind_at);
        Ok(reminders)
    }

    /// Side-by-side facts for two event references.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the snapshot cannot be loaded.
    pub async fn compare(&self, first: &str, second: &str) -> Result<Comparison, EngineError> {
        let snapshot = self.snapshot().await?;
        let catalog = EventCatalog::new(&snapshot.events, self.lookup);

        let left = match catalog.resolve(first) {
            Resolution::Found(event) => EventFacts::of(&snapshot, event),
            Resolution::NotFound { query, suggestions } => {
                return Ok(Comparison::EventNotFound { query, suggestions });
            }
        };
        let right = match catalog.resolve(second) {
            Resolution::Found(event) => EventFacts::of(&snapshot, event),
            Resolution::NotFound { query, suggestions } => {
                return Ok(Comparison::EventNotFound { query, suggestions });
            }
        };

        Ok(Comparison::Compared { left, right })
    }
}
