use std::pin::Pin;

use crate::DeepSeekAdapter;
use crate::api_v1::ChatCompletionRequest;
use colloquy_core::error::{ColloquyError, Result};
use colloquy_core::provider::{ChatCompleteParameters, StreamingChatProvider};
use futures_core::stream::Stream;

impl StreamingChatProvider for DeepSeekAdapter {
    type Delta<'s>
        = Pin<Box<dyn Stream<Item = Result<String>> + Send + 's>>
    where
        Self: 's;

    fn chat_complete_stream<'s, M>(&'s self, params: ChatCompleteParameters<M>) -> Self::Delta<'s>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 's,
    {
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            use futures_util::StreamExt;

            let request = ChatCompletionRequest::try_from(params)?;

            let stream = client.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(ColloquyError::from)?;
                if let Some(text) = chunk.into_text() {
                    yield text;
                }
            }
        })
    }
}
