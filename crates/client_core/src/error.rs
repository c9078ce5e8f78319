use thiserror::Error;

/// Failure of a call against the events backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// Human-readable text for a failed request, falling back to `default` when the
/// error carries no message of its own.
pub fn failure_message(err: &ApiError, default: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}
