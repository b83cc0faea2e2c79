use colloquy_core::error::ColloquyError;
use reqwest::StatusCode;

/// High-level error type covering every failure mode the client can hit.
#[derive(Debug, thiserror::Error)]
pub enum DeepSeekError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("couldn’t serialise body: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("DeepSeek returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("DeepSeek format error: {0}")]
    Format(String),

    #[error("event stream is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl From<DeepSeekError> for ColloquyError {
    fn from(value: DeepSeekError) -> Self {
        ColloquyError::Backend(Box::new(value))
    }
}
