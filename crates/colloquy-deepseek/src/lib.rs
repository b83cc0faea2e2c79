//! DeepSeek back-end for colloquy.
//!
//! DeepSeek speaks the OpenAI *chat/completions* wire format, so this crate
//! also works against any OpenAI-compatible server via
//! [`DeepSeekAdapterBuilder::with_base_url`].
mod adapter;
pub mod api_v1;
mod client;
pub mod error;
mod model_map;
mod provider_impl_chat;
mod provider_impl_chat_stream;
mod sse;

pub use adapter::{API_KEY_ENV, BASE_URL_ENV, DeepSeekAdapter, DeepSeekAdapterBuilder};
pub use client::DeepSeekClient;
pub use model_map::{DEEPSEEK_CHAT, DEEPSEEK_REASONER};
