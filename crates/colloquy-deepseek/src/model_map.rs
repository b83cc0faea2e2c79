use std::borrow::Cow;

use colloquy_core::model::{DeepSeekModel, Model};

pub const DEEPSEEK_CHAT: &str = "deepseek-chat";
pub const DEEPSEEK_REASONER: &str = "deepseek-reasoner";

pub(crate) fn map_model(model: &Model) -> Option<Cow<'static, str>> {
    match model {
        Model::DeepSeek(DeepSeekModel::Chat) => Some(DEEPSEEK_CHAT.into()),
        Model::DeepSeek(DeepSeekModel::Reasoner) => Some(DEEPSEEK_REASONER.into()),
        Model::Custom(name) if !name.trim().is_empty() => Some(name.clone()),
        Model::Custom(_) => None,
    }
}
