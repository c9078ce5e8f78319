use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Backend-assigned event identifier.
///
/// The backend issues UUID strings, but integer ids are accepted on decode so
/// fixtures and older servers round-trip through the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EventId(pub String);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EventIdVisitor;

        impl de::Visitor<'_> for EventIdVisitor {
            type Value = EventId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer event id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<EventId, E> {
                Ok(EventId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<EventId, E> {
                Ok(EventId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<EventId, E> {
                Ok(EventId(v.to_string()))
            }
        }

        deserializer.deserialize_any(EventIdVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Birthday,
    Conference,
    Concert,
    Festival,
    Workshop,
    Seminar,
    Meetup,
    Fundraiser,
    Exhibition,
}

impl EventType {
    pub const ALL: [EventType; 10] = [
        EventType::Wedding,
        EventType::Birthday,
        EventType::Conference,
        EventType::Concert,
        EventType::Festival,
        EventType::Workshop,
        EventType::Seminar,
        EventType::Meetup,
        EventType::Fundraiser,
        EventType::Exhibition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Birthday => "Birthday",
            EventType::Conference => "Conference",
            EventType::Concert => "Concert",
            EventType::Festival => "Festival",
            EventType::Workshop => "Workshop",
            EventType::Seminar => "Seminar",
            EventType::Meetup => "Meetup",
            EventType::Fundraiser => "Fundraiser",
            EventType::Exhibition => "Exhibition",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type '{0}'")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// A persisted event as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    pub budget: f64,
    pub number_of_persons: u32,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty_object")]
    pub payload: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Validated create request; see [`crate::form::EventForm::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    pub budget: f64,
    pub number_of_persons: u32,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty_object")]
    pub payload: Map<String, Value>,
}

fn null_as_empty_object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
