//! Ordered, append-only conversation history.
//!
//! A [`History`] only ever holds sequences the remote model can make sense
//! of:
//!
//! * an optional **single** system message, and only in first position,
//! * followed by strictly alternating `user → assistant → user → …` turns.
//!
//! Two consecutive user messages are the classic failure mode: the model
//! tries to answer the unrecorded turn and ends up repeating or continuing
//! its previous reply. [`History::push`] therefore rejects any message whose
//! role is not the one expected next and leaves the history untouched.
//!
//! ```rust
//! use colloquy_core::history::History;
//! use colloquy_core::message::Message;
//!
//! let mut history = History::with_system("You are terse.");
//! history.push(Message::user("hello")).unwrap();
//! history.push(Message::assistant("hi")).unwrap();
//!
//! assert!(history.push(Message::assistant("again")).is_err());
//! assert_eq!(history.len(), 3);
//! ```
use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

use crate::message::{Message, Role};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("message {index} has role `{found}`, expected `{expected}`")]
    UnexpectedRole {
        index: usize,
        expected: Role,
        found: Role,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// An empty history; the first message may be a system or a user message.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history seeded with a single system message.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(prompt)],
        }
    }

    /// Role the next appended message must carry.
    ///
    /// A system message is additionally accepted while the history is empty.
    pub fn expected_role(&self) -> Role {
        match self.messages.last().map(|m| m.role) {
            Some(Role::User) => Role::Assistant,
            None | Some(Role::System) | Some(Role::Assistant) => Role::User,
        }
    }

    /// Append `message` if its role keeps the alternation intact.
    ///
    /// # Errors
    ///
    /// [`HistoryError::UnexpectedRole`] if the role is out of order. The
    /// history is not modified in that case.
    pub fn push(&mut self, message: Message) -> Result<(), HistoryError> {
        let accepted = if self.messages.is_empty() && message.role == Role::System {
            true
        } else {
            message.role == self.expected_role()
        };

        if !accepted {
            return Err(HistoryError::UnexpectedRole {
                index: self.messages.len(),
                expected: self.expected_role(),
                found: message.role,
            });
        }

        self.messages.push(message);
        Ok(())
    }

    /// Remove a trailing user message that never received an answer.
    ///
    /// Returns `None` (and changes nothing) when the last message is not a
    /// user message.
    pub fn abandon_pending_user(&mut self) -> Option<Message> {
        match self.messages.last() {
            Some(last) if last.role == Role::User => self.messages.pop(),
            _ => None,
        }
    }

    /// `true` when the last message is an unanswered user turn.
    pub fn awaits_reply(&self) -> bool {
        self.expected_role() == Role::Assistant
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl Deref for History {
    type Target = [Message];

    fn deref(&self) -> &Self::Target {
        &self.messages
    }
}

impl TryFrom<Vec<Message>> for History {
    type Error = HistoryError;

    fn try_from(messages: Vec<Message>) -> Result<Self, Self::Error> {
        let mut history = History::new();
        for message in messages {
            history.push(message)?;
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(history: &History) -> Vec<Role> {
        history.iter().map(|m| m.role).collect()
    }

    #[test]
    fn alternation_is_accepted() {
        let mut history = History::with_system("S");
        history.push(Message::user("hello")).unwrap();
        history.push(Message::assistant("hi")).unwrap();
        history.push(Message::user("again")).unwrap();

        assert_eq!(
            roles(&history),
            vec![Role::System, Role::User, Role::Assistant, Role::User]
        );
        assert!(history.awaits_reply());
    }

    #[test]
    fn consecutive_user_messages_are_rejected() {
        let mut history = History::new();
        history.push(Message::user("one")).unwrap();

        let err = history.push(Message::user("two")).unwrap_err();
        assert_eq!(
            err,
            HistoryError::UnexpectedRole {
                index: 1,
                expected: Role::Assistant,
                found: Role::User,
            }
        );
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn system_message_only_in_first_position() {
        let mut history = History::with_system("S");
        assert!(history.push(Message::system("again")).is_err());

        let mut history = History::new();
        history.push(Message::user("hello")).unwrap();
        history.push(Message::assistant("hi")).unwrap();
        assert!(history.push(Message::system("late")).is_err());
    }

    #[test]
    fn assistant_cannot_open_the_conversation() {
        let mut history = History::with_system("S");
        let err = history.push(Message::assistant("hi")).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::UnexpectedRole {
                expected: Role::User,
                ..
            }
        ));
    }

    #[test]
    fn abandon_only_pops_pending_user() {
        let mut history = History::with_system("S");
        assert_eq!(history.abandon_pending_user(), None);

        history.push(Message::user("hello")).unwrap();
        assert_eq!(history.abandon_pending_user(), Some(Message::user("hello")));
        assert_eq!(history.len(), 1);

        history.push(Message::user("hello")).unwrap();
        history.push(Message::assistant("hi")).unwrap();
        assert_eq!(history.abandon_pending_user(), None);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn try_from_validates_every_position() {
        let ok = History::try_from(vec![
            Message::system("S"),
            Message::user("a"),
            Message::assistant("b"),
        ]);
        assert!(ok.is_ok());

        let err = History::try_from(vec![
            Message::user("a"),
            Message::assistant("b"),
            Message::assistant("c"),
        ])
        .unwrap_err();
        assert!(matches!(err, HistoryError::UnexpectedRole { index: 2, .. }));
    }

    #[test]
    fn serializes_as_plain_list() {
        let history = History::with_system("S");
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json, serde_json::json!([{"role": "system", "content": "S"}]));
    }
}
