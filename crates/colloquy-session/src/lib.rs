//! Conversation loop on top of a [`colloquy_core::ChatClient`].
//!
//! The crate keeps one promise: the history sent to the model is always
//! `[system?] user assistant user assistant …`. Blank input is skipped, the
//! exit keyword ends the session, and a failed turn never leaves a
//! half-written assistant message behind.
//!
//! ```rust,ignore
//! let client = ChatClient::new(backend, DeepSeekModel::Chat);
//! let mut conversation = Conversation::start(client, Some("You are friendly.".into()))
//!     .with_error_policy(ErrorPolicy::SkipTurn);
//!
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! conversation.run(stdin, &mut std::io::stdout(), RunOptions::streaming()).await?;
//! ```
mod conversation;
mod driver;
pub mod error;

#[cfg(test)]
mod mock;

pub use conversation::{Conversation, ErrorPolicy, SessionState, Submission};
pub use driver::{RenderMode, RunOptions, SessionEnd, write_usage};
pub use error::SessionError;

/// Keyword that ends an interactive session.
pub const EXIT_SENTINEL: &str = "exit";

/// `true` if `text`, once trimmed, is exactly [`EXIT_SENTINEL`].
///
/// The comparison is case-sensitive: `Exit` is an ordinary message.
pub fn is_exit_sentinel(text: &str) -> bool {
    text.trim() == EXIT_SENTINEL
}
