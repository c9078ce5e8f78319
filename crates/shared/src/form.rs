//! Event composition form and its submit-time validation.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::{
    domain::{EventDraft, EventType},
    error::ValidationError,
};

/// Event being composed. Every field may be unset until submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub event_type: Option<EventType>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub number_of_persons: Option<i64>,
    pub date: Option<NaiveDate>,
    /// Raw JSON text for the extension payload; blank means `{}`.
    pub payload: Option<String>,
}

impl EventForm {
    /// Checks fields in display order and returns the first failure.
    pub fn validate(&self) -> Result<EventDraft, ValidationError> {
        let event_type = self.event_type.ok_or(ValidationError::MissingType)?;

        let description = self
            .description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or(ValidationError::MissingDescription)?;

        let budget = self
            .budget
            .filter(|budget| budget.is_finite() && *budget >= 0.0)
            .ok_or(ValidationError::InvalidBudget)?;

        let number_of_persons = self
            .number_of_persons
            .filter(|count| *count >= 1)
            .and_then(|count| u32::try_from(count).ok())
            .ok_or(ValidationError::InvalidNumberOfPersons)?;

        let date = self.date.ok_or(ValidationError::MissingDate)?;

        let payload = parse_payload(self.payload.as_deref())?;

        Ok(EventDraft {
            event_type,
            description: description.to_string(),
            budget,
            number_of_persons,
            date,
            payload,
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn parse_payload(raw: Option<&str>) -> Result<Map<String, Value>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ValidationError::InvalidPayload),
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
