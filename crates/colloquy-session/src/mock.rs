//! Scripted in-memory provider for unit tests.
//!
//! Blocking replies and streamed chunk sequences are queued up front; every
//! call pops the next one. The backend records how often it was called and
//! how many of its streams were dropped.
use std::{
    collections::VecDeque,
    pin::Pin,
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use colloquy_core::{
    ChatClient,
    error::{ColloquyError, Result},
    message::{Message, ResponseMeta, UsageReport},
    model::Model,
    provider::{ChatCompleteParameters, ChatCompletionProvider, StreamingChatProvider},
};
use futures_util::Stream;

pub(crate) fn backend_error(message: &str) -> ColloquyError {
    ColloquyError::Backend(message.to_string().into())
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<Message>>,
    streams: VecDeque<Vec<Result<String>>>,
    generate_calls: usize,
    stream_calls: usize,
    released_streams: usize,
    last_request: Vec<Message>,
}

#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    script: Arc<Mutex<Script>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, content: &str) -> Self {
        let usage = UsageReport {
            prompt_tokens: 10,
            completion_tokens: 2,
            total_tokens: 12,
            cached_tokens: Some(4),
        };
        let message = Message::assistant(content).with_meta(ResponseMeta {
            usage: Some(usage),
            finish_reason: None,
        });
        self.script.lock().unwrap().replies.push_back(Ok(message));
        self
    }

    pub(crate) fn reply_message(self, message: Message) -> Self {
        self.script.lock().unwrap().replies.push_back(Ok(message));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Err(backend_error(message)));
        self
    }

    pub(crate) fn stream(self, chunks: &[&str]) -> Self {
        let chunks = chunks.iter().map(|c| Ok(c.to_string())).collect();
        self.script.lock().unwrap().streams.push_back(chunks);
        self
    }

    /// Stream `chunks`, then fail instead of reaching end-of-stream.
    pub(crate) fn stream_then_fail(self, chunks: &[&str], message: &str) -> Self {
        let mut items: Vec<Result<String>> = chunks.iter().map(|c| Ok(c.to_string())).collect();
        items.push(Err(backend_error(message)));
        self.script.lock().unwrap().streams.push_back(items);
        self
    }

    pub(crate) fn client(self) -> ChatClient<Self> {
        ChatClient::new(self, Model::custom("mock"))
    }

    pub(crate) fn generate_calls(&self) -> usize {
        self.script.lock().unwrap().generate_calls
    }

    pub(crate) fn stream_calls(&self) -> usize {
        self.script.lock().unwrap().stream_calls
    }

    pub(crate) fn released_streams(&self) -> usize {
        self.script.lock().unwrap().released_streams
    }

    pub(crate) fn last_request(&self) -> Vec<Message> {
        self.script.lock().unwrap().last_request.clone()
    }
}

impl ChatCompletionProvider for MockBackend {
    type Message = Message;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> Pin<Box<dyn Future<Output = Result<Message>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let mut script = self.script.lock().unwrap();
        script.generate_calls += 1;
        script.last_request = params.into_messages().into_iter().map(Into::into).collect();
        let reply = script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(backend_error("no scripted reply")));
        Box::pin(async move { reply })
    }
}

impl StreamingChatProvider for MockBackend {
    type Delta<'s>
        = MockStream
    where
        Self: 's;

    fn chat_complete_stream<'p, M>(&'p self, params: ChatCompleteParameters<M>) -> Self::Delta<'p>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let mut script = self.script.lock().unwrap();
        script.stream_calls += 1;
        script.last_request = params.into_messages().into_iter().map(Into::into).collect();
        let items = script
            .streams
            .pop_front()
            .unwrap_or_else(|| vec![Err(backend_error("no scripted stream"))]);

        MockStream {
            items: items.into(),
            script: Arc::clone(&self.script),
        }
    }
}

/// Yields its scripted items and counts its own drop as a release.
pub(crate) struct MockStream {
    items: VecDeque<Result<String>>,
    script: Arc<Mutex<Script>>,
}

impl Stream for MockStream {
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().items.pop_front())
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        if let Ok(mut script) = self.script.lock() {
            script.released_streams += 1;
        }
    }
}
