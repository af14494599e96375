//! Event reference resolution.
//!
//! Callers name events loosely: by id or by display name, with arbitrary case and
//! surrounding whitespace. [`EventCatalog::resolve`] turns such a reference into a
//! catalog row, or into a ranked list of "did you mean" names when nothing matches.

use crate::config::LookupConfig;
use crate::similarity;
use booking_core::types::Event;
use smallvec::SmallVec;

/// "Did you mean" names offered when a reference does not resolve.
pub type Suggestions = SmallVec<[String; 3]>;

/// Result of resolving an event reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The reference names exactly one catalog row (the first, in store order)
    Found(&'a Event),
    /// Nothing matched; the closest names, best first
    NotFound {
        /// Trimmed reference as supplied
        query: String,
        /// Up to `suggestion_limit` names above the similarity cutoff
        suggestions: Suggestions,
    },
}

impl<'a> Resolution<'a> {
    /// The resolved event, if any
    #[must_use]
    pub const fn event(&self) -> Option<&'a Event> {
        match self {
            Self::Found(event) => Some(*event),
            Self::NotFound { .. } => None,
        }
    }
}

/// Read-only view over the event catalog.
#[derive(Debug, Clone, Copy)]
pub struct EventCatalog<'a> {
    events: &'a [Event],
    lookup: LookupConfig,
}

impl<'a> EventCatalog<'a> {
    /// Wrap a catalog slice (store order is preserved)
    #[must_use]
    pub const fn new(events: &'a [Event], lookup: LookupConfig) -> Self {
        Self { events, lookup }
    }

    /// Resolve `reference` by id or by name.
    ///
    /// Ids must match exactly; names are trimmed and compared case-insensitively. When
    /// several rows share a name the first in store order wins.
    #[must_use]
    pub fn resolve(&self, reference: &str) -> Resolution<'a> {
        let query = reference.trim();
        let wanted = query.to_lowercase();

        let found = self.events.iter().find(|event| {
            event.id.as_str() == query || event.name.trim().to_lowercase() == wanted
        });

        match found {
            Some(event) => Resolution::Found(event),
            None => {
                let suggestions = self.suggest(query);
                tracing::debug!(query, ?suggestions, "Event reference did not resolve");
                Resolution::NotFound {
                    query: query.to_string(),
                    suggestions,
                }
            }
        }
    }

    /// Closest catalog names to `query`, best first.
    #[must_use]
    pub fn suggest(&self, query: &str) -> Suggestions {
        if query.is_empty() {
            return Suggestions::new();
        }

        similarity::close_matches(
            query,
            self.events.iter().map(|event| event.name.as_str()),
            self.lookup.suggestion_limit,
            self.lookup.suggestion_cutoff,
        )
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code can use unwrap
mod tests {
    use super::*;
    use booking_testing::sample_catalog;

    fn catalog(events: &[Event]) -> EventCatalog<'_> {
        EventCatalog::new(events, LookupConfig::default())
    }

    #[test]
    fn resolves_by_name_ignoring_case_and_whitespace() {
        let events = sample_catalog();
        let resolved = catalog(&events).resolve("  techfest 2025 ").event().unwrap();
        assert_eq!(resolved.id.as_str(), "E001");
    }

    #[test]
    fn resolves_by_id() {
        let events = sample_catalog();
        let resolved = catalog(&events).resolve(" E003").event().unwrap();
        assert_eq!(resolved.name, "Startup Pitch Night");
        assert!(catalog(&events).resolve("e003").event().is_none());
    }

    #[test]
    fn duplicate_names_resolve_to_first_row() {
        let mut events = sample_catalog();
        let mut twin = events[1].clone();
        twin.id = booking_core::types::EventId::new("E099");
        events.push(twin);

        let resolved = catalog(&events).resolve("AI Summit").event().unwrap();
        assert_eq!(resolved.id.as_str(), "E002");
    }

    #[test]
    fn misspelling_yields_suggestions() {
        let events = sample_catalog();
        match catalog(&events).resolve("TechFset") {
            Resolution::NotFound { query, suggestions } => {
                assert_eq!(query, "TechFset");
                assert_eq!(suggestions.as_slice(), ["TechFest 2025".to_string()]);
            }
            Resolution::Found(event) => panic!("unexpected match: {}", event.name),
        }
    }

    #[test]
    fn blank_reference_has_no_suggestions() {
        let events = sample_catalog();
        match catalog(&events).resolve("   ") {
            Resolution::NotFound { suggestions, .. } => assert!(suggestions.is_empty()),
            Resolution::Found(event) => panic!("unexpected match: {}", event.name),
        }
    }
}
