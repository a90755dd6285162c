//! Error types for the remote sync tier.

use thiserror::Error;

/// Result type alias for remote sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Errors that can occur while talking to the sheet endpoint.
///
/// Every variant is a transport-class failure from the repository's point of
/// view: reads fall back to the local store, writes keep the local copy and
/// surface a non-fatal warning. The client never retries internally.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Network-level failure reaching the endpoint (includes timeouts)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed JSON in the response body, or a row that does not match the
    /// expected record shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success HTTP status from the endpoint
    #[error("sheet endpoint returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Application-level `status: "error"` in an otherwise valid response
    #[error("sheet endpoint reported an error: {0}")]
    Remote(String),

    /// Response parsed but did not carry what the operation requires
    #[error("unexpected sheet response: {0}")]
    Protocol(String),
}

impl SheetError {
    /// Create a status error from an HTTP status code and body preview.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create an application-level remote error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// HTTP status if this is a status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
