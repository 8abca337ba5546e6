//! Error types for the Contentful client core.
//!
//! # Design
//! Every fallible operation in this crate returns `ContentfulError`. The
//! variants stay coarse on purpose: upstream failures carry the raw status
//! and body, transport faults carry the stack's message. `testConnection`
//! style reporting is a different rendering of the same value, see
//! [`ContentfulError::connection_message`].

use crate::http::TransportError;

/// Fallback when a transport fault arrives without a message.
pub const CONNECT_FALLBACK: &str = "Failed to connect to Contentful";

/// Errors returned by the client, service and management layers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentfulError {
    /// No configuration has been supplied to the service.
    #[error("Contentful client not configured")]
    NotConfigured,

    /// The upstream returned a non-2xx status.
    #[error("Contentful API error: {status} - {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ContentfulError {
    /// Render the error the way a connection probe reports it.
    pub fn connection_message(&self) -> String {
        match self {
            ContentfulError::NotConfigured => "Client not configured".to_string(),
            ContentfulError::Http { status, body } => {
                format!("Connection failed: {status} - {body}")
            }
            ContentfulError::Transport(msg) if msg.is_empty() => CONNECT_FALLBACK.to_string(),
            other => other.to_string(),
        }
    }

    /// Replace an empty transport message with an operation-specific one.
    pub(crate) fn or_fallback(self, fallback: &str) -> Self {
        match self {
            ContentfulError::Transport(msg) if msg.is_empty() => {
                ContentfulError::Transport(fallback.to_string())
            }
            other => other,
        }
    }
}

impl From<TransportError> for ContentfulError {
    fn from(err: TransportError) -> Self {
        ContentfulError::Transport(err.message)
    }
}
