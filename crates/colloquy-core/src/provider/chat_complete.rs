use std::{future::Future, pin::Pin};

use crate::{error::Result, message::Message, model::Model, provider::GenerationOptions};
use futures_core::stream::Stream;

/// A **backend** turns a chat history into a network call to a concrete
/// provider (DeepSeek, any OpenAI-compatible server, …) and parses the reply.
///
/// The trait is intentionally minimal:
///
/// * **One associated type** – the in-memory `Message` representation this
///   provider accepts.
/// * **One async-ish method** – `chat_complete`, which performs a *single*
///   non-streaming round-trip and returns the assistant message.
///
/// The method returns a [`Pin<Box<dyn Future>>`] so we stay object-safe
/// without pulling in `async_trait`.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this backend.
    type Message: Send + Sync + 'static;

    /// Execute the chat request and return the assistant's reply.
    ///
    /// The returned message always carries [`Role::Assistant`](crate::message::Role::Assistant).
    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<Message>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p;
}

/// A provider that can deliver the model’s answer **incrementally**.
///
/// The stream yields UTF-8 text *deltas* and ends with `None` once the
/// provider signalled end-of-stream.  Deltas carry no role and no usage;
/// assembling them into a [`Message`] is the caller’s job.  Dropping the
/// stream releases the underlying connection.
pub trait StreamingChatProvider: ChatCompletionProvider {
    type Delta<'s>: Stream<Item = Result<String>> + Send + 's
    where
        Self: 's;

    /// Start a streaming chat completion.
    fn chat_complete_stream<'p, M>(&'p self, params: ChatCompleteParameters<M>) -> Self::Delta<'p>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p;
}

#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M: Clone> {
    pub messages: Vec<M>,
    pub model: Model,
    pub options: GenerationOptions,
}

impl<M: Clone> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: Model) -> Self {
        Self {
            messages,
            model,
            options: GenerationOptions::default(),
        }
    }

    pub fn messages(&self) -> &Vec<M> {
        &self.messages
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn into_messages(self) -> Vec<M> {
        self.messages
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}
