use tokio::sync::watch;
use tracing::debug;

use crate::{
    actions::EventsAction,
    state::{reduce, EventsState},
};

/// Sole owner of [`EventsState`]. Every mutation goes through [`EventStore::apply`],
/// and each resulting snapshot is published to subscribers.
pub struct EventStore {
    state: EventsState,
    publisher: watch::Sender<EventsState>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::with_state(EventsState::default())
    }

    pub fn with_state(state: EventsState) -> Self {
        let (publisher, _) = watch::channel(state.clone());
        Self { state, publisher }
    }

    pub fn snapshot(&self) -> &EventsState {
        &self.state
    }

    pub fn apply(&mut self, action: &EventsAction) -> &EventsState {
        let prior = std::mem::take(&mut self.state);
        self.state = reduce(prior, action);
        debug!(
            action = action.name(),
            events = self.state.events.len(),
            loading = self.state.loading,
            submit_status = self.state.submit_status.as_str(),
            "applied action"
        );
        self.publisher.send_replace(self.state.clone());
        &self.state
    }

    pub fn subscribe(&self) -> watch::Receiver<EventsState> {
        self.publisher.subscribe()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
