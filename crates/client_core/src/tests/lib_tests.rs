use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use shared::domain::{EventId, EventType};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    posted: Arc<Mutex<Vec<Value>>>,
}

fn stored_event_json(id: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "type": kind,
        "description": "from server",
        "budget": 120.0,
        "numberOfPersons": 4,
        "date": "2024-06-01",
        "payload": {},
        "createdAt": "2024-05-01T00:00:00Z"
    })
}

async fn handle_list(State(_state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "events": [stored_event_json("b", "Concert"), stored_event_json("a", "Wedding")]
    }))
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.posted.lock().await.push(body.clone());
    let mut created = body;
    created["id"] = json!("c0ffee");
    created["createdAt"] = json!("2024-05-02T08:30:00Z");
    (StatusCode::CREATED, Json(created))
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn serve(app: Router) -> Result<String, std::io::Error> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_events_server() -> (String, ServerState) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/", get(handle_health))
        .route("/events", get(handle_list).post(handle_create))
        .with_state(state.clone());
    (serve(app).await.expect("spawn server"), state)
}

async fn spawn_failing_server(status: StatusCode) -> String {
    let app = Router::new().route(
        "/events",
        get(move || async move { status }).post(move || async move { status }),
    );
    serve(app).await.expect("spawn server")
}

fn sample_draft() -> EventDraft {
    let mut payload = serde_json::Map::new();
    payload.insert("room".to_string(), json!("B2"));
    EventDraft {
        event_type: EventType::Birthday,
        description: "Party".to_string(),
        budget: 100.0,
        number_of_persons: 5,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"),
        payload,
    }
}

#[tokio::test]
async fn list_events_decodes_collection_in_server_order() {
    let (server_url, _state) = spawn_events_server().await;
    let client = HttpEventsClient::new(server_url);

    let events = client.list_events().await.expect("list");
    let ids: Vec<_> = events.iter().map(|event| event.id.0.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(events[0].event_type, EventType::Concert);
}

#[tokio::test]
async fn create_event_posts_draft_and_returns_server_event() {
    let (server_url, state) = spawn_events_server().await;
    let client = HttpEventsClient::new(format!("{server_url}/"));

    let event = client.create_event(&sample_draft()).await.expect("create");
    assert_eq!(event.id, EventId("c0ffee".to_string()));
    assert_eq!(event.event_type, EventType::Birthday);
    assert_eq!(event.payload["room"], "B2");
    assert_eq!(
        event.created_at.to_rfc3339(),
        "2024-05-02T08:30:00+00:00"
    );

    let posted = state.posted.lock().await;
    assert_eq!(posted.len(), 1);
    assert_eq!(
        posted[0],
        json!({
            "type": "Birthday",
            "description": "Party",
            "budget": 100.0,
            "numberOfPersons": 5,
            "date": "2024-06-01",
            "payload": { "room": "B2" }
        })
    );
}

#[tokio::test]
async fn non_success_status_maps_to_http_error_message() {
    let server_url = spawn_failing_server(StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpEventsClient::new(server_url);

    let err = client.create_event(&sample_draft()).await.expect_err("must fail");
    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.status(), Some(500));

    let err = client.list_events().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Status { status: 500 }));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let app = Router::new().route("/events", get(|| async { "definitely not json" }));
    let client = HttpEventsClient::new(serve(app).await.expect("spawn server"));

    let err = client.list_events().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Decode(_)), "unexpected error: {err:?}");
    assert!(!error::failure_message(&err, "Failed to fetch events").is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");

    let client = HttpEventsClient::new(format!("http://{addr}"));
    let err = client.list_events().await.expect_err("must fail");
    assert!(matches!(err, ApiError::Transport(_)), "unexpected error: {err:?}");
    assert_eq!(client.backend_status_label().await, BACKEND_UNREACHABLE_STATUS);
}

#[tokio::test]
async fn health_reports_backend_status() {
    let (server_url, _state) = spawn_events_server().await;
    let client = HttpEventsClient::new(server_url);

    assert!(client.health().await.expect("health").is_ok());
    assert_eq!(client.backend_status_label().await, "ok");
}

#[test]
fn base_url_drops_trailing_slashes() {
    let client = HttpEventsClient::new("http://localhost:8080//");
    assert_eq!(client.base_url(), "http://localhost:8080");
}

#[test]
fn failure_message_prefers_error_text() {
    let err = ApiError::Status { status: 404 };
    assert_eq!(
        error::failure_message(&err, RequestKind::Fetch.default_failure_message()),
        "HTTP error! status: 404"
    );
}
