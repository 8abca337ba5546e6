//! CLI error types.

use contentful_core::ContentfulError;

use crate::store::StoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Contentful(#[from] ContentfulError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The connection probe reported a failure.
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Validation(String),
}
