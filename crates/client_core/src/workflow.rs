//! Bridges request actions to the events backend.
//!
//! A single task owns the [`EventStore`] and serializes every mutation: actions
//! dispatched through an [`EventsHandle`] and results coming back from request
//! tasks share one loop. Each request of a given [`RequestKind`] takes a fresh
//! ticket; a result is applied only if its ticket is still the newest for its
//! kind, so a superseded request never overwrites a later one. The network call
//! itself is left to finish.

use std::{sync::Arc, time::Duration};

use shared::{domain::EventDraft, error::ValidationError, form::EventForm};
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    actions::{EventsAction, RequestKind},
    config::ClientSettings,
    error::failure_message,
    state::EventsState,
    store::EventStore,
    EventsApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("events workflow is no longer running")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Latest ticket issued per request kind.
#[derive(Debug, Default, Clone)]
pub(crate) struct RequestTickets {
    fetch: u64,
    create: u64,
}

impl RequestTickets {
    fn slot(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Fetch => &mut self.fetch,
            RequestKind::Create => &mut self.create,
        }
    }

    pub(crate) fn issue(&mut self, kind: RequestKind) -> u64 {
        let slot = self.slot(kind);
        *slot += 1;
        *slot
    }

    pub(crate) fn is_current(&self, kind: RequestKind, ticket: u64) -> bool {
        let latest = match kind {
            RequestKind::Fetch => self.fetch,
            RequestKind::Create => self.create,
        };
        latest == ticket
    }
}

struct Completion {
    kind: RequestKind,
    ticket: u64,
    action: EventsAction,
}

pub struct EventsWorkflow {
    api: Arc<dyn EventsApi>,
    store: EventStore,
    tickets: RequestTickets,
    submit_reset_delay: Option<Duration>,
    commands: mpsc::UnboundedReceiver<EventsAction>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
}

/// Cloneable entry point for consumers: dispatch actions, read snapshots.
#[derive(Clone)]
pub struct EventsHandle {
    commands: mpsc::UnboundedSender<EventsAction>,
    state: watch::Receiver<EventsState>,
}

impl EventsWorkflow {
    /// `submit_reset_delay` of `None` disables the automatic return to idle
    /// after a successful create.
    pub fn new(
        api: Arc<dyn EventsApi>,
        submit_reset_delay: Option<Duration>,
    ) -> (Self, EventsHandle) {
        let store = EventStore::new();
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let handle = EventsHandle {
            commands: commands_tx,
            state: store.subscribe(),
        };
        let workflow = Self {
            api,
            store,
            tickets: RequestTickets::default(),
            submit_reset_delay,
            commands,
            completions_tx,
            completions,
        };
        (workflow, handle)
    }

    pub fn from_settings(api: Arc<dyn EventsApi>, settings: &ClientSettings) -> (Self, EventsHandle) {
        Self::new(api, settings.submit_reset_delay())
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until every [`EventsHandle`] has been dropped.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(action) => self.handle_action(action),
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }
        debug!("events workflow stopped");
    }

    fn handle_action(&mut self, action: EventsAction) {
        self.store.apply(&action);

        match action {
            EventsAction::FetchEventsRequested => {
                let ticket = self.tickets.issue(RequestKind::Fetch);
                self.spawn_fetch(ticket);
            }
            EventsAction::CreateEventRequested(draft) => {
                let ticket = self.tickets.issue(RequestKind::Create);
                self.spawn_create(ticket, draft);
            }
            _ => {}
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Completion {
            kind,
            ticket,
            action,
        } = completion;

        if !self.tickets.is_current(kind, ticket) {
            debug!(
                ?kind,
                ticket,
                action = action.name(),
                "discarded result of superseded request"
            );
            return;
        }

        self.store.apply(&action);

        if matches!(action, EventsAction::CreateEventSucceeded(_)) {
            self.schedule_submit_reset(ticket);
        }
    }

    fn spawn_fetch(&self, ticket: u64) {
        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            info!(ticket, "fetching events");
            let action = match api.list_events().await {
                Ok(events) => {
                    info!(ticket, count = events.len(), "fetched events");
                    EventsAction::FetchEventsSucceeded(events)
                }
                Err(err) => {
                    warn!(ticket, error = %err, "failed to fetch events");
                    EventsAction::FetchEventsFailed(failure_message(
                        &err,
                        RequestKind::Fetch.default_failure_message(),
                    ))
                }
            };
            let _ = completions.send(Completion {
                kind: RequestKind::Fetch,
                ticket,
                action,
            });
        });
    }

    fn spawn_create(&self, ticket: u64, draft: EventDraft) {
        let api = Arc::clone(&self.api);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            info!(ticket, event_type = %draft.event_type, "creating event");
            let action = match api.create_event(&draft).await {
                Ok(event) => {
                    info!(ticket, id = %event.id, "created event");
                    EventsAction::CreateEventSucceeded(event)
                }
                Err(err) => {
                    warn!(ticket, error = %err, "failed to create event");
                    EventsAction::CreateEventFailed(failure_message(
                        &err,
                        RequestKind::Create.default_failure_message(),
                    ))
                }
            };
            let _ = completions.send(Completion {
                kind: RequestKind::Create,
                ticket,
                action,
            });
        });
    }

    // Tied to the create ticket so a newer submission cancels the pending reset.
    fn schedule_submit_reset(&self, ticket: u64) {
        let Some(delay) = self.submit_reset_delay else {
            return;
        };
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = completions.send(Completion {
                kind: RequestKind::Create,
                ticket,
                action: EventsAction::ResetSubmitStatus,
            });
        });
    }
}

impl EventsHandle {
    pub fn dispatch(&self, action: EventsAction) -> Result<(), DispatchError> {
        let name = action.name();
        self.commands
            .send(action)
            .map_err(|_| DispatchError::Closed)?;
        debug!(action = name, "dispatched action");
        Ok(())
    }

    pub fn fetch_events(&self) -> Result<(), DispatchError> {
        self.dispatch(EventsAction::FetchEventsRequested)
    }

    /// Dispatches an already validated draft.
    pub fn create_event(&self, draft: EventDraft) -> Result<(), DispatchError> {
        self.dispatch(EventsAction::CreateEventRequested(draft))
    }

    /// Validates the form and dispatches a create request. A validation failure is
    /// returned to the caller and leaves the store untouched.
    pub fn submit_form(&self, form: &EventForm) -> Result<(), SubmitError> {
        let draft = form.validate()?;
        self.create_event(draft)?;
        Ok(())
    }

    pub fn clear_error(&self) -> Result<(), DispatchError> {
        self.dispatch(EventsAction::ClearError)
    }

    pub fn reset_submit_status(&self) -> Result<(), DispatchError> {
        self.dispatch(EventsAction::ResetSubmitStatus)
    }

    pub fn snapshot(&self) -> EventsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<EventsState> {
        self.state.clone()
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
