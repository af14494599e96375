//! Configuration management for the booking engine.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Record store configuration
    pub store: StoreConfig,
    /// Event lookup configuration
    pub lookup: LookupConfig,
    /// Advisory projection thresholds
    pub advisory: AdvisoryConfig,
    /// Log filter directive (`RUST_LOG` syntax)
    pub log_level: String,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `events.json`, `attendees.json` and `bookings.json`
    pub data_dir: PathBuf,
}

/// Event lookup configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LookupConfig {
    /// Maximum number of "did you mean" suggestions on a miss
    pub suggestion_limit: usize,
    /// Minimum similarity ratio for a name to be suggested
    pub suggestion_cutoff: f64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: 3,
            suggestion_cutoff: 0.5,
        }
    }
}

/// Advisory projection thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdvisoryConfig {
    /// Active bookings at or above which an attendee is warned about overcommitment
    pub overcommit_threshold: usize,
    /// Utilisation percentage below which an event is reported as under-utilised
    pub under_utilized_pct: u32,
    /// Utilisation percentage above which an event is reported as near capacity
    pub near_capacity_pct: u32,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            overcommit_threshold: 3,
            under_utilized_pct: 30,
            near_capacity_pct: 90,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                data_dir: PathBuf::from("data"),
            },
            lookup: LookupConfig::default(),
            advisory: AdvisoryConfig::default(),
            log_level: "info,booking=debug".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            store: StoreConfig {
                data_dir: env::var("BOOKING_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.store.data_dir),
            },
            lookup: LookupConfig {
                suggestion_limit: env::var("BOOKING_SUGGESTION_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.lookup.suggestion_limit),
                suggestion_cutoff: env::var("BOOKING_SUGGESTION_CUTOFF")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|cutoff: &f64| (0.0..=1.0).contains(cutoff))
                    .unwrap_or(defaults.lookup.suggestion_cutoff),
            },
            advisory: AdvisoryConfig {
                overcommit_threshold: env::var("BOOKING_OVERCOMMIT_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.advisory.overcommit_threshold),
                under_utilized_pct: env::var("BOOKING_UNDER_UTILIZED_PCT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.advisory.under_utilized_pct),
                near_capacity_pct: env::var("BOOKING_NEAR_CAPACITY_PCT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.advisory.near_capacity_pct),
            },
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}
