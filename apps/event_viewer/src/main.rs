use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use client_core::{
    load_settings,
    selectors::{distinct_event_types, empty_list_message, filter_events, EventFilter},
    EventsWorkflow, HttpEventsClient,
};
use shared::domain::Event;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    info!(api_base_url = %settings.api_base_url, "loaded settings");

    let client = Arc::new(HttpEventsClient::from_settings(&settings));
    let status = client.backend_status_label().await;
    println!("Backend status : {status}");

    let (workflow, handle) = EventsWorkflow::from_settings(client, &settings);
    let worker = workflow.spawn();

    let mut state_rx = handle.subscribe();
    handle.fetch_events()?;
    state_rx
        .changed()
        .await
        .context("events workflow stopped before fetching")?;
    let state = state_rx
        .wait_for(|state| !state.loading)
        .await
        .context("events workflow stopped while fetching")?
        .clone();

    if let Some(message) = &state.error {
        warn!(%message, "could not load events");
        drop(handle);
        let _ = worker.await;
        return Err(anyhow!("failed to load events: {message}"));
    }

    let filter = EventFilter::default();
    let visible = filter_events(&state.events, &filter);
    match empty_list_message(&state.events, &visible) {
        Some(message) => println!("{message}"),
        None => {
            let types: Vec<&str> = distinct_event_types(&state.events)
                .into_iter()
                .map(|kind| kind.as_str())
                .collect();
            println!("Events ({}) - types: {}", visible.len(), types.join(", "));
            for event in visible {
                println!("{}", render_event(event));
            }
        }
    }

    drop(handle);
    let _ = worker.await;
    Ok(())
}

fn render_event(event: &Event) -> String {
    format!(
        "{} | {} | {} | ${:.2} | {} persons | created {}",
        event.date,
        event.event_type,
        event.description,
        event.budget,
        event.number_of_persons,
        event.created_at.format("%Y-%m-%d %H:%M:%S")
    )
}
