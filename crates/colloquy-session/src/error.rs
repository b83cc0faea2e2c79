use colloquy_core::{error::ColloquyError, history::HistoryError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The blocking generation call failed.
    #[error("generation failed: {0}")]
    Generation(#[source] ColloquyError),

    /// The streaming call failed before end-of-stream.
    #[error("stream receive failed: {0}")]
    StreamReceive(#[source] ColloquyError),

    /// An append would have broken the role alternation.
    #[error("history rejected the message: {0}")]
    History(#[from] HistoryError),

    /// Reading input or writing output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("the session has already terminated")]
    Terminated,
}

impl SessionError {
    /// Errors confined to a single turn, which the skip-turn policy can
    /// recover from.
    pub fn is_turn_error(&self) -> bool {
        matches!(
            self,
            SessionError::Generation(_) | SessionError::StreamReceive(_) | SessionError::History(_)
        )
    }
}
