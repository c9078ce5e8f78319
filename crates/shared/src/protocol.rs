use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Event;

/// Body of `GET /events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEventsResponse {
    #[serde(default, deserialize_with = "null_as_empty_list")]
    pub events: Vec<Event>,
}

/// Body of the liveness probe `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

fn null_as_empty_list<'de, D>(deserializer: D) -> Result<Vec<Event>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Event>>::deserialize(deserializer)?.unwrap_or_default())
}
