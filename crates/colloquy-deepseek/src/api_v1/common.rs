use colloquy_core::message::UsageReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens_details: Option<PromptTokensDetails>,
    /// DeepSeek reports context-cache hits at the top level as well.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_cache_hit_tokens: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub struct PromptTokensDetails {
    #[serde(default)]
    pub cached_tokens: i64,
}

impl From<Usage> for UsageReport {
    fn from(value: Usage) -> Self {
        let cached_tokens = value
            .prompt_tokens_details
            .map(|details| details.cached_tokens)
            .or(value.prompt_cache_hit_tokens);

        UsageReport {
            prompt_tokens: value.prompt_tokens,
            completion_tokens: value.completion_tokens,
            total_tokens: value.total_tokens,
            cached_tokens,
        }
    }
}
