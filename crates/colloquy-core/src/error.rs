//! Unified error type exposed by **`colloquy-core`**.
//!
//! Provider crates convert their internal errors into one of these variants
//! before bubbling them up to the [`ChatClient`](crate::ChatClient).  This
//! keeps the public API small while still conveying rich diagnostic
//! information through [`std::error::Error::source`].

use thiserror::Error;

use crate::history::HistoryError;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ColloquyError>;

#[derive(Debug, Error)]
pub enum ColloquyError {
    /// The chat-model client could not be constructed (missing credentials,
    /// unusable HTTP settings, …).  A session never starts in this case.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The selected backend does not recognise or support the requested
    /// `model`.
    #[error("provider `{provider}` does not support model `{model}`")]
    ModelNotSupported { provider: &'static str, model: String },

    /// Failure while serialising or deserialising JSON payloads sent to / received
    /// from the LLM provider.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The request was rejected before anything was sent, e.g. a generation
    /// option is out of range.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An append would have broken the role ordering of the history.
    #[error(transparent)]
    History(#[from] HistoryError),
}
