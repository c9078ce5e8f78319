//! Derived views over the event list used by the browse page.

use chrono::NaiveDate;
use shared::domain::{Event, EventType};

pub const NO_EVENTS_MESSAGE: &str = "No events found. Create your first event!";
pub const NO_MATCHES_MESSAGE: &str = "No events match your search criteria.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive substring of the type name; blank matches everything.
    pub type_query: String,
    pub date: Option<NaiveDate>,
}

impl EventFilter {
    pub fn is_active(&self) -> bool {
        !self.type_query.trim().is_empty() || self.date.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, event: &Event) -> bool {
        let query = self.type_query.trim().to_lowercase();
        let type_matches =
            query.is_empty() || event.event_type.as_str().to_lowercase().contains(&query);
        let date_matches = self.date.map_or(true, |date| event.date == date);
        type_matches && date_matches
    }
}

pub fn filter_events<'a>(events: &'a [Event], filter: &EventFilter) -> Vec<&'a Event> {
    events.iter().filter(|event| filter.matches(event)).collect()
}

/// Types present in `events`, without duplicates, sorted by name.
pub fn distinct_event_types(events: &[Event]) -> Vec<EventType> {
    let mut types: Vec<EventType> = events.iter().map(|event| event.event_type).collect();
    types.sort_by_key(|kind| kind.as_str());
    types.dedup();
    types
}

pub fn empty_list_message(all: &[Event], filtered: &[&Event]) -> Option<&'static str> {
    if all.is_empty() {
        Some(NO_EVENTS_MESSAGE)
    } else if filtered.is_empty() {
        Some(NO_MATCHES_MESSAGE)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
