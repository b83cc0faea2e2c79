//! Model identifiers used throughout the **colloquy** workspace.
//!
//! The enum keeps the public API simple while allowing each provider crate
//! to map the variants onto its own naming scheme.  You never have to type
//! literal strings such as `"deepseek-chat"` in application code; pick an
//! enum variant and let the adapter translate it.
//!
//! # Adding more models
//!
//! 1. Add the variant to the provider sub-enum (`DeepSeekModel`, …).
//! 2. Update the mapping function in the provider crate
//!    (`colloquy-deepseek::model_map::map_model`).
//! 3. The compiler points out every match statement you forgot.
//!
//! # Example
//!
//! ```rust
//! use colloquy_core::model::{DeepSeekModel, Model};
//! assert_eq!(Model::from(DeepSeekModel::Chat),
//!            Model::DeepSeek(DeepSeekModel::Chat));
//! ```
use std::borrow::Cow;

/// Universal identifier for an LLM model.
///
/// * `DeepSeek` – models officially supported by the DeepSeek back-end.
/// * `Custom` – any model name not covered by a dedicated enum, e.g. a
///   self-hosted deployment behind an OpenAI-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    DeepSeek(DeepSeekModel),
    Custom(Cow<'static, str>),
}

impl Model {
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Model::Custom(name.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeepSeekModel {
    /// General chat model.
    Chat,
    /// Reasoning model; emits a separate chain of thought before answering.
    Reasoner,
}

impl From<DeepSeekModel> for Model {
    fn from(val: DeepSeekModel) -> Self {
        Model::DeepSeek(val)
    }
}
