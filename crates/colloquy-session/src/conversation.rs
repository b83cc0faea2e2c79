//! The read–generate–append cycle.
//!
//! A [`Conversation`] owns the [`History`] of one session and is the only
//! thing that appends to it. Every operation leaves the history valid: a
//! failed turn never commits a partial assistant message.
//!
//! ```text
//!  AwaitingInput ──exit──────────────► Terminated
//!        │                                 ▲
//!   non-empty input                        │ failure (Fatal)
//!        ▼                                 │
//!    Generating ───────────────────────────┘
//!        │   └──failure (SkipTurn)──► AwaitingInput
//!        └──success──────────────────► AwaitingInput
//! ```
use std::io::Write;
use std::time::Instant;

use colloquy_core::{
    ChatClient,
    history::{History, HistoryError},
    message::{Message, Role},
    provider::{ChatCompletionProvider, StreamingChatProvider},
};
use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::{Result, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Generating,
    Terminated,
}

/// What happens to the session when a turn fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Any generation failure ends the session.
    #[default]
    Fatal,
    /// Report the failure, drop the unanswered user message and wait for the
    /// next input. I/O failures are still fatal.
    SkipTurn,
}

/// Outcome of [`Conversation::submit_user_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The user message was appended; a reply is expected next.
    Accepted,
    /// The input was blank. Nothing changed; prompt again.
    EmptyInputSkip,
}

#[derive(Debug)]
pub struct Conversation<B> {
    client: ChatClient<B>,
    history: History,
    state: SessionState,
    error_policy: ErrorPolicy,
}

impl<B> Conversation<B>
where
    B: ChatCompletionProvider,
    Message: Into<B::Message>,
{
    /// Begin a session, seeding the history with `system_prompt` if given.
    pub fn start(client: ChatClient<B>, system_prompt: Option<String>) -> Self {
        let history = match system_prompt {
            Some(prompt) => History::with_system(prompt),
            None => History::new(),
        };

        Self {
            client,
            history,
            state: SessionState::AwaitingInput,
            error_policy: ErrorPolicy::default(),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn client(&self) -> &ChatClient<B> {
        &self.client
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// End the session. Later operations fail with [`SessionError::Terminated`].
    pub fn end(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Append the user's input as the next turn.
    ///
    /// The text is trimmed first; blank input yields
    /// [`Submission::EmptyInputSkip`] without touching the history. Callers
    /// check [`is_exit_sentinel`](crate::is_exit_sentinel) before this.
    ///
    /// # Errors
    ///
    /// [`SessionError::History`] if the previous user turn is still
    /// unanswered, [`SessionError::Terminated`] after the session ended.
    pub fn submit_user_turn(&mut self, text: &str) -> Result<Submission> {
        self.ensure_open()?;

        let text = text.trim();
        if text.is_empty() {
            return Ok(Submission::EmptyInputSkip);
        }

        self.history.push(Message::user(text))?;
        self.state = SessionState::Generating;
        debug!(history_len = self.history.len(), "user turn submitted");
        Ok(Submission::Accepted)
    }

    /// Ask the model for the complete reply to the pending user turn.
    ///
    /// On success the reply is appended and a copy returned for display.
    ///
    /// # Errors
    ///
    /// [`SessionError::Generation`] if the provider call fails. The error
    /// policy then decides between terminating and skipping the turn.
    #[tracing::instrument(level = "debug", skip_all, fields(history_len = self.history.len()))]
    pub async fn generate_blocking(&mut self) -> Result<Message> {
        self.begin_generation()?;
        let started = Instant::now();

        match self.client.generate(&self.history).await {
            Ok(reply) => {
                debug!(elapsed_ms = started.elapsed().as_millis() as u64, "reply received");
                self.commit_reply(reply)
            }
            Err(err) => Err(self.fail_turn(SessionError::Generation(err))),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Err(SessionError::Terminated);
        }
        Ok(())
    }

    fn begin_generation(&mut self) -> Result<()> {
        self.ensure_open()?;

        if !self.history.awaits_reply() {
            return Err(SessionError::History(HistoryError::UnexpectedRole {
                index: self.history.len(),
                expected: self.history.expected_role(),
                found: Role::Assistant,
            }));
        }

        self.state = SessionState::Generating;
        Ok(())
    }

    fn commit_reply(&mut self, reply: Message) -> Result<Message> {
        if let Err(err) = self.history.push(reply.clone()) {
            return Err(self.fail_turn(err.into()));
        }
        self.state = SessionState::AwaitingInput;
        Ok(reply)
    }

    /// Apply the error policy to a failed turn and hand the error back.
    fn fail_turn(&mut self, err: SessionError) -> SessionError {
        match self.error_policy {
            ErrorPolicy::SkipTurn if err.is_turn_error() => {
                self.history.abandon_pending_user();
                self.state = SessionState::AwaitingInput;
                warn!(error = %err, "turn skipped");
            }
            _ => {
                self.state = SessionState::Terminated;
                warn!(error = %err, "session terminated");
            }
        }
        err
    }
}

impl<B> Conversation<B>
where
    B: StreamingChatProvider,
    Message: Into<B::Message>,
{
    /// Ask the model for the reply as a stream, echoing every chunk to
    /// `sink` as it arrives.
    ///
    /// The chunks are concatenated in arrival order into one assistant
    /// message, which is appended once the stream reports end-of-stream.
    /// The stream is released before this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`SessionError::StreamReceive`] if the stream fails before its end;
    /// nothing is appended in that case. [`SessionError::Io`] if `sink`
    /// cannot be written.
    #[tracing::instrument(level = "debug", skip_all, fields(history_len = self.history.len()))]
    pub async fn generate_streaming<W>(&mut self, sink: &mut W) -> Result<Message>
    where
        W: Write + ?Sized,
    {
        self.begin_generation()?;
        let started = Instant::now();

        let assembled = assemble(self.client.stream(&self.history), sink).await;

        match assembled {
            Ok((text, chunks)) => {
                debug!(
                    chunks,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "stream finished"
                );
                self.commit_reply(Message::assistant(text))
            }
            Err(err) => Err(self.fail_turn(err)),
        }
    }
}

/// Drain `stream` to its end, writing each chunk through to `sink`.
///
/// Takes the stream by value so it is dropped, and the connection behind
/// it released, on every return path.
async fn assemble<S, W>(stream: S, sink: &mut W) -> Result<(String, usize)>
where
    S: Stream<Item = colloquy_core::error::Result<String>>,
    W: Write + ?Sized,
{
    let mut stream = std::pin::pin!(stream);
    let mut buffer = String::new();
    let mut chunks = 0usize;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(SessionError::StreamReceive)?;
        sink.write_all(chunk.as_bytes())?;
        sink.flush()?;
        buffer.push_str(&chunk);
        chunks += 1;
    }

    Ok((buffer, chunks))
}
