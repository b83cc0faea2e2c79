//! Line-oriented interactive front end for a [`Conversation`].
use std::io::Write;

use colloquy_core::{
    message::{Message, UsageReport},
    provider::StreamingChatProvider,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::info;

use crate::{
    EXIT_SENTINEL,
    conversation::{Conversation, SessionState, Submission},
    error::{Result, SessionError},
    is_exit_sentinel,
};

/// How assistant replies are produced and shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Wait for the complete reply, then print it.
    #[default]
    Blocking,
    /// Print chunks as they arrive.
    Streaming,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub mode: RenderMode,
    /// Print token usage after each blocking reply.
    pub show_usage: bool,
}

impl RunOptions {
    pub fn blocking() -> Self {
        Self {
            mode: RenderMode::Blocking,
            show_usage: false,
        }
    }

    pub fn streaming() -> Self {
        Self {
            mode: RenderMode::Streaming,
            show_usage: false,
        }
    }

    pub fn with_usage(mut self, show_usage: bool) -> Self {
        self.show_usage = show_usage;
        self
    }
}

/// Why [`Conversation::run`] returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed the exit sentinel.
    ExitRequested,
    /// The input reached end-of-file.
    InputClosed,
}

impl<B> Conversation<B>
where
    B: StreamingChatProvider,
    Message: Into<B::Message>,
{
    /// Drive the session: prompt, read a line, generate, render, repeat.
    ///
    /// # Errors
    ///
    /// Any error that terminates the session under its
    /// [`ErrorPolicy`](crate::ErrorPolicy), and every I/O error.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W, options: RunOptions) -> Result<SessionEnd>
    where
        R: AsyncBufRead + Unpin,
        W: Write + ?Sized,
    {
        if self.state() == SessionState::Terminated {
            return Err(SessionError::Terminated);
        }

        writeln!(output, "Starting conversation (type '{EXIT_SENTINEL}' to quit):")?;
        let mut lines = input.lines();

        loop {
            write!(output, "\nYou: ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(output)?;
                self.end();
                info!("input closed, session ended");
                return Ok(SessionEnd::InputClosed);
            };

            if is_exit_sentinel(&line) {
                writeln!(output, "Goodbye!")?;
                self.end();
                info!("exit requested, session ended");
                return Ok(SessionEnd::ExitRequested);
            }

            if self.submit_user_turn(&line)? == Submission::EmptyInputSkip {
                continue;
            }

            let outcome = match options.mode {
                RenderMode::Blocking => match self.generate_blocking().await {
                    Ok(reply) => render_reply(&mut *output, &reply, options.show_usage),
                    Err(err) => Err(err),
                },
                RenderMode::Streaming => {
                    write!(output, "AI: ")?;
                    output.flush()?;
                    match self.generate_streaming(&mut *output).await {
                        Ok(_) => writeln!(output).map_err(SessionError::from),
                        Err(err) => Err(err),
                    }
                }
            };

            match outcome {
                Ok(()) => {}
                Err(err) if self.state() == SessionState::Terminated || !err.is_turn_error() => {
                    self.end();
                    return Err(err);
                }
                Err(err) => writeln!(output, "\n[turn skipped] {err}")?,
            }
        }
    }
}

fn render_reply<W>(output: &mut W, reply: &Message, show_usage: bool) -> Result<()>
where
    W: Write + ?Sized,
{
    writeln!(output, "\nAI: {}", reply.content)?;
    if show_usage {
        if let Some(usage) = reply.usage() {
            write_usage(output, usage)?;
        }
    }
    Ok(())
}

/// Print a token usage block; cached tokens only when there were any.
pub fn write_usage<W>(output: &mut W, usage: &UsageReport) -> std::io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(output, "\nToken usage:")?;
    writeln!(output, "  prompt tokens:     {}", usage.prompt_tokens)?;
    writeln!(output, "  completion tokens: {}", usage.completion_tokens)?;
    writeln!(output, "  total tokens:      {}", usage.total_tokens)?;
    if let Some(cached) = usage.cached_tokens.filter(|&cached| cached > 0) {
        writeln!(output, "  cached tokens:     {cached}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use colloquy_core::message::Role;

    use super::*;
    use crate::{conversation::ErrorPolicy, mock::MockBackend};

    async fn run_script(
        conversation: &mut Conversation<MockBackend>,
        script: &str,
        options: RunOptions,
    ) -> (Result<SessionEnd>, String) {
        let mut output = Vec::new();
        let end = conversation.run(script.as_bytes(), &mut output, options).await;
        (end, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn exit_as_first_input_appends_nothing() {
        let mut conversation =
            Conversation::start(MockBackend::new().client(), Some("S".into()));

        let (end, output) = run_script(&mut conversation, "exit\n", RunOptions::blocking()).await;

        assert_eq!(end.unwrap(), SessionEnd::ExitRequested);
        assert_eq!(conversation.history().messages(), &[Message::system("S")]);
        assert_eq!(conversation.state(), SessionState::Terminated);
        assert!(output.starts_with("Starting conversation (type 'exit' to quit):"));
        assert!(output.ends_with("Goodbye!\n"));
        assert_eq!(conversation.client().backend().generate_calls(), 0);
    }

    #[tokio::test]
    async fn end_of_input_closes_the_session() {
        let mut conversation =
            Conversation::start(MockBackend::new().reply("hi").client(), None);

        let (end, _) = run_script(&mut conversation, "hello", RunOptions::blocking()).await;

        assert_eq!(end.unwrap(), SessionEnd::InputClosed);
        assert_eq!(conversation.history().len(), 2);
        assert_eq!(conversation.state(), SessionState::Terminated);
    }

    #[tokio::test]
    async fn blocking_run_prints_replies_and_skips_blank_lines() {
        let mut conversation = Conversation::start(
            MockBackend::new().reply("hi").reply("fine").client(),
            Some("S".into()),
        );

        let script = "hello\n\n   \nhow are you\n exit \n";
        let (end, output) = run_script(&mut conversation, script, RunOptions::blocking()).await;

        assert_eq!(end.unwrap(), SessionEnd::ExitRequested);
        assert!(output.contains("\nAI: hi\n"));
        assert!(output.contains("\nAI: fine\n"));
        assert!(!output.contains("Token usage"));

        let roles: Vec<Role> = conversation.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(conversation.client().backend().generate_calls(), 2);
    }

    #[tokio::test]
    async fn streaming_run_echoes_chunks_after_prefix() {
        let mut conversation =
            Conversation::start(MockBackend::new().stream(&["He", "llo"]).client(), None);

        let (end, output) =
            run_script(&mut conversation, "greet me\nexit\n", RunOptions::streaming()).await;

        assert_eq!(end.unwrap(), SessionEnd::ExitRequested);
        assert!(output.contains("You: AI: Hello\n"));
        assert_eq!(conversation.history().last(), Some(&Message::assistant("Hello")));
        assert_eq!(conversation.client().backend().released_streams(), 1);
    }

    #[tokio::test]
    async fn skip_turn_reports_and_keeps_going() {
        let mut conversation = Conversation::start(
            MockBackend::new().fail("rate limited").reply("hi").client(),
            None,
        )
        .with_error_policy(ErrorPolicy::SkipTurn);

        let (end, output) =
            run_script(&mut conversation, "first\nsecond\nexit\n", RunOptions::blocking()).await;

        assert_eq!(end.unwrap(), SessionEnd::ExitRequested);
        assert!(output.contains("[turn skipped] generation failed: backend returned an error: rate limited"));
        let contents: Vec<&str> = conversation
            .history()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["second", "hi"]);
    }

    #[tokio::test]
    async fn fatal_policy_returns_the_error() {
        let mut conversation = Conversation::start(
            MockBackend::new()
                .stream_then_fail(&["par"], "connection reset")
                .client(),
            None,
        );

        let (end, output) =
            run_script(&mut conversation, "hello\nexit\n", RunOptions::streaming()).await;

        assert!(matches!(end, Err(SessionError::StreamReceive(_))));
        assert_eq!(conversation.state(), SessionState::Terminated);
        assert_eq!(conversation.history().len(), 1);
        assert!(!output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn run_refuses_a_terminated_session() {
        let mut conversation = Conversation::start(MockBackend::new().client(), None);
        conversation.end();

        let (end, output) = run_script(&mut conversation, "hello\n", RunOptions::blocking()).await;

        assert!(matches!(end, Err(SessionError::Terminated)));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn usage_is_printed_when_requested() {
        let mut conversation =
            Conversation::start(MockBackend::new().reply("hi").client(), None);

        let (_, output) = run_script(
            &mut conversation,
            "hello\nexit\n",
            RunOptions::blocking().with_usage(true),
        )
        .await;

        assert!(output.contains("Token usage:"));
        assert!(output.contains("total tokens:      12"));
        assert!(output.contains("cached tokens:     4"));
    }

    #[test]
    fn usage_block_omits_zero_cached_tokens() {
        let usage = UsageReport {
            prompt_tokens: 7,
            completion_tokens: 3,
            total_tokens: 10,
            cached_tokens: Some(0),
        };
        let mut out = Vec::new();
        write_usage(&mut out, &usage).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("prompt tokens:     7"));
        assert!(out.contains("completion tokens: 3"));
        assert!(!out.contains("cached"));
    }
}
