//! Application state for the event log and its pure transition function.

use shared::domain::Event;

use crate::actions::EventsAction;

/// Lifecycle of the most recent create-event request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl SubmitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmitStatus::Idle => "idle",
            SubmitStatus::Loading => "loading",
            SubmitStatus::Succeeded => "succeeded",
            SubmitStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventsState {
    /// Newest created first; replaced wholesale by a successful fetch.
    pub events: Vec<Event>,
    pub loading: bool,
    pub error: Option<String>,
    pub submit_status: SubmitStatus,
}

impl EventsState {
    pub fn is_submitting(&self) -> bool {
        self.submit_status == SubmitStatus::Loading
    }
}

/// Applies one action. Total and free of side effects.
pub fn reduce(mut state: EventsState, action: &EventsAction) -> EventsState {
    match action {
        EventsAction::FetchEventsRequested => {
            state.loading = true;
            state.error = None;
        }
        EventsAction::FetchEventsSucceeded(events) => {
            state.loading = false;
            state.events = events.clone();
            state.error = None;
        }
        EventsAction::FetchEventsFailed(message) => {
            state.loading = false;
            state.error = Some(message.clone());
        }
        EventsAction::CreateEventRequested(_) => {
            state.submit_status = SubmitStatus::Loading;
            state.error = None;
        }
        EventsAction::CreateEventSucceeded(event) => {
            state.submit_status = SubmitStatus::Succeeded;
            state.events.insert(0, event.clone());
            state.error = None;
        }
        EventsAction::CreateEventFailed(message) => {
            state.submit_status = SubmitStatus::Failed;
            state.error = Some(message.clone());
        }
        EventsAction::ResetSubmitStatus => {
            state.submit_status = SubmitStatus::Idle;
        }
        EventsAction::ClearError => {
            state.error = None;
        }
        EventsAction::SetEvents(events) => {
            state.events = events.clone();
        }
        EventsAction::AddEvent(event) => {
            state.events.insert(0, event.clone());
        }
    }
    state
}

/// Folds a batch of actions, one step at a time.
pub fn reduce_all<'a, I>(state: EventsState, actions: I) -> EventsState
where
    I: IntoIterator<Item = &'a EventsAction>,
{
    actions.into_iter().fold(state, reduce)
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
