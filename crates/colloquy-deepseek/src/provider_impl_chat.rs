use std::sync::Arc;

use colloquy_core::{
    error::Result,
    message::Message,
    provider::{ChatCompleteParameters, ChatCompletionProvider},
};

use crate::{
    DeepSeekAdapter,
    api_v1::{ChatCompletionMessage, ChatCompletionRequest},
};

impl ChatCompletionProvider for DeepSeekAdapter {
    type Message = ChatCompletionMessage;

    fn chat_complete<'p, M>(
        &self,
        params: ChatCompleteParameters<M>,
    ) -> std::pin::Pin<Box<dyn Future<Output = Result<Message>> + Send + 'p>>
    where
        M: Into<Self::Message> + Clone + Send + Sync + 'p,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            let request = ChatCompletionRequest::try_from(params)?;

            let response = client.chat_completion(request).await?;

            #[cfg(feature = "tracing")]
            if let Some(usage) = &response.usage {
                tracing::debug!(
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    "chat completion finished"
                );
            }

            Ok(response.into_message()?)
        })
    }
}
