use thiserror::Error;

/// Client-side rejection of an event form, raised before anything is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Event type is required")]
    MissingType,
    #[error("Description is required")]
    MissingDescription,
    #[error("Please enter a valid budget")]
    InvalidBudget,
    #[error("Please enter a valid number of persons (at least 1)")]
    InvalidNumberOfPersons,
    #[error("Date is required")]
    MissingDate,
    #[error("Payload must be a JSON object")]
    InvalidPayload,
}

impl ValidationError {
    /// Name of the form field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingType => "type",
            ValidationError::MissingDescription => "description",
            ValidationError::InvalidBudget => "budget",
            ValidationError::InvalidNumberOfPersons => "numberOfPersons",
            ValidationError::MissingDate => "date",
            ValidationError::InvalidPayload => "payload",
        }
    }
}
