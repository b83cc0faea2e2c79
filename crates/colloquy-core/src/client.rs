//! Generic, lightweight chat-model client bound to a single concrete backend.
//!
//! The client is **generic over the backend type `B`**, so the compiler
//! guarantees that the core [`Message`] converts into whatever wire message
//! the backend expects, and no dynamic dispatch appears in user code.
//!
//! On top of the raw provider traits it remembers *which* model to call and
//! *how* (the [`GenerationOptions`]), so callers only hand over a history:
//!
//! ```rust,ignore
//! let client = ChatClient::new(backend, DeepSeekModel::Chat)
//!     .with_options(GenerationOptions::new().with_temperature(0.7));
//!
//! let reply = client.generate(&[Message::user("Hello!")]).await?;
//! println!("{}", reply.content);
//! ```
//!
//! Any backend crate (e.g. `colloquy-deepseek`) just implements the provider
//! traits and the same client works out of the box.
use std::sync::Arc;

use crate::{
    error::Result,
    message::Message,
    model::Model,
    provider::{
        ChatCompleteParameters, ChatCompletionProvider, GenerationOptions, StreamingChatProvider,
    },
};

/// A client bound to a single provider, model and set of generation options.
///
/// Cloning is cheap: the backend sits behind an `Arc`.
#[derive(Debug)]
pub struct ChatClient<B> {
    backend: Arc<B>,
    model: Model,
    options: GenerationOptions,
}

impl<B> Clone for ChatClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            model: self.model.clone(),
            options: self.options.clone(),
        }
    }
}

impl<B> ChatClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B, model: impl Into<Model>) -> Self {
        Self {
            backend: Arc::new(backend),
            model: model.into(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Access the underlying backend (e.g. to tweak provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    fn parameters(&self, history: &[Message]) -> ChatCompleteParameters<Message> {
        ChatCompleteParameters::new(history.to_vec(), self.model.clone())
            .with_options(self.options.clone())
    }

    /// Send the whole `history` and wait for the complete assistant reply.
    pub async fn generate(&self, history: &[Message]) -> Result<Message>
    where
        Message: Into<B::Message>,
    {
        self.backend.chat_complete(self.parameters(history)).await
    }

    /// Send the whole `history` and receive the reply as text deltas.
    pub fn stream<'a>(&'a self, history: &[Message]) -> B::Delta<'a>
    where
        B: StreamingChatProvider,
        Message: Into<B::Message>,
    {
        self.backend.chat_complete_stream(self.parameters(history))
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for ChatClient<B> {
    type Message = B::Message;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<Message>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        self.backend.chat_complete(params)
    }
}

impl<B: StreamingChatProvider> StreamingChatProvider for ChatClient<B> {
    type Delta<'s>
        = B::Delta<'s>
    where
        Self: 's;

    fn chat_complete_stream<'p, M>(&'p self, params: ChatCompleteParameters<M>) -> Self::Delta<'p>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        self.backend.chat_complete_stream(params)
    }
}
