//! Terminal outcomes of engine operations.
//!
//! Every rejection the engine can produce is a variant here, not an error: callers
//! render them to the end user. [`crate::engine::EngineError`] is reserved for
//! record store failures.
//!
//! Each outcome also exposes a stable, snake-case `label()` used for metrics and
//! structured logs, and a `Display` rendering suitable for a chat or console reply.

use crate::capacity::SeatCount;
use crate::catalog::Suggestions;
use crate::conflict::{ConflictEntry, ConflictResult};
use booking_core::types::{Attendee, AttendeeId, BookingId, EventId};
use serde::Serialize;
use std::fmt;

/// Input field names reported by `MissingFields` variants.
pub type MissingList = Vec<&'static str>;

fn write_suggestions(f: &mut fmt::Formatter<'_>, query: &str, suggestions: &Suggestions) -> fmt::Result {
    write!(f, "No event matches '{query}'.")?;
    if !suggestions.is_empty() {
        write!(f, " Did you mean: {}?", suggestions.join(", "))?;
    }
    Ok(())
}

// ============================================================================
// Registration
// ============================================================================

/// Result of [`crate::engine::BookingEngine::register`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    /// A new `Registered` booking was written
    Registered {
        /// The new booking
        booking_id: BookingId,
        /// Holder (possibly created by this call)
        attendee_id: AttendeeId,
        /// Event booked
        event_id: EventId,
        /// Its display name
        event_name: String,
    },
    /// One or more inputs were blank
    MissingFields {
        /// Which ones
        fields: MissingList,
    },
    /// The attendee already holds a booking on the same date
    ConflictRejected {
        /// The clashing bookings
        conflicts: Vec<ConflictEntry>,
    },
    /// The event reference did not resolve
    EventNotFound {
        /// Reference as supplied (trimmed)
        query: String,
        /// Closest catalog names
        suggestions: Suggestions,
    },
    /// No seats left; the caller is conceptually waitlisted
    Full {
        /// Event that is full
        event_name: String,
        /// Always `true`: the waitlist is a signal, not a queue
        waitlisted: bool,
    },
    /// The attendee already holds an active booking for this event
    AlreadyRegistered {
        /// The existing booking
        booking_id: BookingId,
        /// Event name
        event_name: String,
    },
}

impl RegistrationOutcome {
    /// Whether a booking row was written
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    /// Booking id carried by `Registered` and `AlreadyRegistered`
    #[must_use]
    pub const fn booking_id(&self) -> Option<&BookingId> {
        match self {
            Self::Registered { booking_id, .. } | Self::AlreadyRegistered { booking_id, .. } => {
                Some(booking_id)
            }
            _ => None,
        }
    }

    /// Stable label for metrics and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::MissingFields { .. } => "missing_fields",
            Self::ConflictRejected { .. } => "conflict",
            Self::EventNotFound { .. } => "event_not_found",
            Self::Full { .. } => "full",
            Self::AlreadyRegistered { .. } => "already_registered",
        }
    }
}

impl fmt::Display for RegistrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered {
                booking_id,
                event_name,
                ..
            } => write!(f, "Registered for {event_name}. Booking ID: {booking_id}"),
            Self::MissingFields { fields } => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::ConflictRejected { conflicts } => {
                let clashes: Vec<String> = conflicts
                    .iter()
                    .map(|c| format!("{} at {}", c.event_name, c.time.format("%H:%M")))
                    .collect();
                write!(
                    f,
                    "Schedule conflict: already booked on that date for {}",
                    clashes.join(", ")
                )
            }
            Self::EventNotFound { query, suggestions } => write_suggestions(f, query, suggestions),
            Self::Full { event_name, .. } => write!(
                f,
                "{event_name} is full. You have been added to the waitlist."
            ),
            Self::AlreadyRegistered {
                booking_id,
                event_name,
            } => write!(
                f,
                "Already registered for {event_name} (booking {booking_id})"
            ),
        }
    }
}

// ============================================================================
// Cancellation
// ============================================================================

/// Result of [`crate::engine::BookingEngine::cancel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CancellationOutcome {
    /// The active booking was flipped to `Canceled`
    Canceled {
        /// The booking that was canceled
        booking_id: BookingId,
        /// Event name
        event_name: String,
        /// Always `true`: one seat was released
        freed_seat: bool,
    },
    /// One or more inputs were blank
    MissingFields {
        /// Which ones
        fields: MissingList,
    },
    /// No attendee has this email
    AttendeeNotFound {
        /// Email as supplied (trimmed)
        email: String,
    },
    /// The event reference did not resolve
    EventNotFound {
        /// Reference as supplied (trimmed)
        query: String,
        /// Closest catalog names
        suggestions: Suggestions,
    },
    /// The attendee holds no `Registered` booking for the event
    NoActiveBooking {
        /// Event name
        event_name: String,
    },
}

impl CancellationOutcome {
    /// Whether a seat was released
    #[must_use]
    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Stable label for metrics and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Canceled { .. } => "canceled",
            Self::MissingFields { .. } => "missing_fields",
            Self::AttendeeNotFound { .. } => "attendee_not_found",
            Self::EventNotFound { .. } => "event_not_found",
            Self::NoActiveBooking { .. } => "no_active_booking",
        }
    }
}

impl fmt::Display for CancellationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled {
                booking_id,
                event_name,
                ..
            } => write!(f, "Booking {booking_id} for {event_name} canceled. A seat is now free."),
            Self::MissingFields { fields } => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::AttendeeNotFound { email } => write!(f, "No attendee found with email {email}"),
            Self::EventNotFound { query, suggestions } => write_suggestions(f, query, suggestions),
            Self::NoActiveBooking { event_name } => {
                write!(f, "No active booking found for {event_name}")
            }
        }
    }
}

// ============================================================================
// Signup
// ============================================================================

/// Result of [`crate::engine::BookingEngine::sign_up`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignupOutcome {
    /// A new attendee row was written
    Created {
        /// The new attendee
        attendee: Attendee,
    },
    /// One or more inputs were blank
    MissingFields {
        /// Which ones
        fields: MissingList,
    },
    /// An attendee with this email (ignoring case) already exists
    EmailTaken {
        /// The existing attendee
        existing: Attendee,
    },
}

impl SignupOutcome {
    /// Stable label for metrics and logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::MissingFields { .. } => "missing_fields",
            Self::EmailTaken { .. } => "email_taken",
        }
    }
}

impl fmt::Display for SignupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { attendee } => write!(
                f,
                "Registered {} as attendee {}",
                attendee.name, attendee.id
            ),
            Self::MissingFields { fields } => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::EmailTaken { existing } => {
                write!(f, "Email {} is already registered", existing.email)
            }
        }
    }
}

// ============================================================================
// Read-side outcomes
// ============================================================================

/// Result of [`crate::engine::BookingEngine::seats_left`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeatsLeft {
    /// The event resolved
    Available {
        /// Event id
        event_id: EventId,
        /// Event name
        event_name: String,
        /// Seat figures
        seats: SeatCount,
    },
    /// The event reference did not resolve
    EventNotFound {
        /// Reference as supplied (trimmed)
        query: String,
        /// Closest catalog names
        suggestions: Suggestions,
    },
}

impl SeatsLeft {
    /// Seats left, if the event resolved
    #[must_use]
    pub const fn count(&self) -> Option<u32> {
        match self {
            Self::Available { seats, .. } => Some(seats.seats_left),
            Self::EventNotFound { .. } => None,
        }
    }
}

impl fmt::Display for SeatsLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available {
                event_name, seats, ..
            } => write!(
                f,
                "{event_name}: {} of {} seats left",
                seats.seats_left, seats.capacity
            ),
            Self::EventNotFound { query, suggestions } => write_suggestions(f, query, suggestions),
        }
    }
}

/// Result of [`crate::engine::BookingEngine::detect_conflict`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ConflictCheck {
    /// The event resolved and was checked
    Checked(ConflictResult),
    /// The event reference did not resolve
    EventNotFound {
        /// Reference as supplied (trimmed)
        query: String,
        /// Closest catalog names
        suggestions: Suggestions,
    },
}

impl ConflictCheck {
    /// Whether a clash was found (`false` when the event did not resolve)
    #[must_use]
    pub fn has_conflict(&self) -> bool {
        match self {
            Self::Checked(result) => result.has_conflict(),
            Self::EventNotFound { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use smallvec::smallvec;

    #[test]
    fn labels_are_stable() {
        let full = RegistrationOutcome::Full {
            event_name: "Startup Pitch Night".to_string(),
            waitlisted: true,
        };
        assert_eq!(full.label(), "full");
        assert!(!full.is_registered());

        let none = CancellationOutcome::NoActiveBooking {
            event_name: "AI Summit".to_string(),
        };
        assert_eq!(none.label(), "no_active_booking");
    }

    #[test]
    fn not_found_lists_suggestions() {
        let outcome = RegistrationOutcome::EventNotFound {
            query: "TechFset".to_string(),
            suggestions: smallvec!["TechFest 2025".to_string()],
        };
        assert_eq!(
            outcome.to_string(),
            "No event matches 'TechFset'. Did you mean: TechFest 2025?"
        );

        let bare = SeatsLeft::EventNotFound {
            query: "zzz".to_string(),
            suggestions: Suggestions::new(),
        };
        assert_eq!(bare.to_string(), "No event matches 'zzz'.");
    }

    #[test]
    fn conflict_rendering_names_the_clash() {
        let outcome = RegistrationOutcome::ConflictRejected {
            conflicts: vec![ConflictEntry {
                event_id: EventId::new("E001"),
                event_name: "TechFest 2025".to_string(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            }],
        };
        assert!(outcome.to_string().contains("TechFest 2025 at 10:00"));
    }

    #[test]
    fn outcomes_serialize_with_a_tag() {
        let outcome = RegistrationOutcome::MissingFields {
            fields: vec!["email"],
        };
        let json = serde_json::to_value(&outcome).unwrap_or_default();
        assert_eq!(json["outcome"], "missing_fields");
        assert_eq!(json["fields"][0], "email");
    }
}
