use colloquy_core::error::ColloquyError;
use colloquy_core::message::{self, Message, ResponseMeta, Role};
use colloquy_core::provider::ChatCompleteParameters;
use serde::{Deserialize, Serialize};

use crate::error::DeepSeekError;
use crate::model_map::map_model;

use super::common;

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatCompletionRequest {
    pub fn new(model: String, messages: Vec<ChatCompletionMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: None,
            presence_penalty: None,
            frequency_penalty: None,
            stream: None,
        }
    }
}

impl<M> TryFrom<ChatCompleteParameters<M>> for ChatCompletionRequest
where
    M: Into<ChatCompletionMessage> + Clone,
{
    type Error = ColloquyError;

    fn try_from(value: ChatCompleteParameters<M>) -> Result<Self, Self::Error> {
        value.options.validate()?;

        let model = map_model(&value.model).ok_or_else(|| ColloquyError::ModelNotSupported {
            provider: "deepseek",
            model: format!("{:?}", value.model),
        })?;

        let options = value.options;
        let messages = value.messages.into_iter().map(Into::into).collect();
        Ok(Self {
            temperature: options.temperature,
            top_p: options.top_p,
            max_tokens: options.max_tokens,
            stop: options.stop,
            presence_penalty: options.presence_penalty,
            frequency_penalty: options.frequency_penalty,
            ..Self::new(model.into_owned(), messages)
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ChatCompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionMessageForResponse {
    pub role: MessageRole,
    #[serde(default)]
    pub content: Option<String>,
    /// Chain of thought produced by `deepseek-reasoner`. It must not be sent
    /// back in later requests, so it never reaches the history.
    #[serde(default)]
    pub reasoning_content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub index: i64,
    pub message: ChatCompletionMessageForResponse,
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    pub usage: Option<common::Usage>,
    pub system_fingerprint: Option<String>,
}

impl ChatCompletionResponse {
    /// Turn the first choice into a core assistant [`Message`] carrying usage
    /// and finish reason.
    ///
    /// # Errors
    ///
    /// [`DeepSeekError::Format`] if there is no choice or the choice is not
    /// an assistant message.
    pub fn into_message(self) -> Result<Message, DeepSeekError> {
        let Some(choice) = self.choices.into_iter().find(|c| c.index == 0) else {
            return Err(DeepSeekError::Format("response has no choices".into()));
        };

        if choice.message.role != MessageRole::Assistant {
            return Err(DeepSeekError::Format(format!(
                "expected an assistant message, got role {:?}",
                choice.message.role
            )));
        }

        let meta = ResponseMeta {
            usage: self.usage.map(Into::into),
            finish_reason: choice.finish_reason.map(Into::into),
        };

        Ok(Message::assistant(choice.message.content.unwrap_or_default()).with_meta(meta))
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    ToolCalls,
    InsufficientSystemResource,
}

impl From<FinishReason> for message::FinishReason {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Stop => message::FinishReason::Stop,
            FinishReason::Length => message::FinishReason::Length,
            FinishReason::ContentFilter => message::FinishReason::ContentFilter,
            FinishReason::ToolCalls => message::FinishReason::ToolCalls,
            FinishReason::InsufficientSystemResource => {
                message::FinishReason::InsufficientSystemResource
            }
        }
    }
}

impl From<Role> for MessageRole {
    fn from(value: Role) -> Self {
        match value {
            Role::System => MessageRole::System,
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
        }
    }
}

impl From<Message> for ChatCompletionMessage {
    fn from(value: Message) -> Self {
        Self {
            role: value.role.into(),
            content: value.content,
        }
    }
}
