use bugtrack_core::bug::FieldError;
use bugtrack_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A success response that did not carry the expected payload.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client-side form checks failed; nothing was sent.
    #[error("Please fix the highlighted fields")]
    InvalidForm(Vec<FieldError>),

    /// The bug is not in the locally loaded list.
    #[error("Bug {0} is not loaded")]
    NotFound(DbId),
}

impl ClientError {
    /// The message the server sent, if this error came from the server.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Field-level validation errors returned with a 400.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ClientError::Api { errors, .. } | ClientError::InvalidForm(errors) => errors,
            _ => &[],
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
