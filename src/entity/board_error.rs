use reqwest::StatusCode;

use crate::entity::DraftField;

/// Problems caught before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Total supply and total holders must be greater than 0!")]
    NonPositiveAmounts,

    #[error("Form is invalid! Please check the fields... ({0} is required)")]
    MissingField(DraftField),

    #[error("{field} must be a whole number, got {input:?}")]
    InvalidNumber { field: DraftField, input: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Unauthorized: stored access token was cleared")]
    Unauthorized,

    #[error("Credential storage error: {0}")]
    Credentials(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Failures that come back from talking to the API, 401 included
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BoardError::Transport(_) | BoardError::Status { .. } | BoardError::Unauthorized
        )
    }
}

pub type BoardResult<T> = std::result::Result<T, BoardError>;
