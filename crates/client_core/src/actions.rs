//! Named state transitions understood by the events store.

use shared::domain::{Event, EventDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum EventsAction {
    FetchEventsRequested,
    FetchEventsSucceeded(Vec<Event>),
    FetchEventsFailed(String),
    CreateEventRequested(EventDraft),
    CreateEventSucceeded(Event),
    CreateEventFailed(String),
    ResetSubmitStatus,
    ClearError,
    SetEvents(Vec<Event>),
    AddEvent(Event),
}

/// Request kinds that are superseded independently of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Fetch,
    Create,
}

impl RequestKind {
    pub fn default_failure_message(self) -> &'static str {
        match self {
            RequestKind::Fetch => "Failed to fetch events",
            RequestKind::Create => "Failed to create event",
        }
    }
}

impl EventsAction {
    pub fn name(&self) -> &'static str {
        match self {
            EventsAction::FetchEventsRequested => "fetch_events_requested",
            EventsAction::FetchEventsSucceeded(_) => "fetch_events_succeeded",
            EventsAction::FetchEventsFailed(_) => "fetch_events_failed",
            EventsAction::CreateEventRequested(_) => "create_event_requested",
            EventsAction::CreateEventSucceeded(_) => "create_event_succeeded",
            EventsAction::CreateEventFailed(_) => "create_event_failed",
            EventsAction::ResetSubmitStatus => "reset_submit_status",
            EventsAction::ClearError => "clear_error",
            EventsAction::SetEvents(_) => "set_events",
            EventsAction::AddEvent(_) => "add_event",
        }
    }

    /// The request kind this action starts, if it is a request.
    pub fn request_kind(&self) -> Option<RequestKind> {
        match self {
            EventsAction::FetchEventsRequested => Some(RequestKind::Fetch),
            EventsAction::CreateEventRequested(_) => Some(RequestKind::Create),
            _ => None,
        }
    }
}
