//! # Single Chat – One Request, One Reply
//!
//! Sends a system prompt plus one user message to `deepseek-chat` and prints
//! the reply followed by its token usage.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example single_chat
//! ```

use colloquy::{
    ChatClient,
    deepseek::DeepSeekAdapterBuilder,
    message::Message,
    model::DeepSeekModel,
    session::write_usage,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let backend = DeepSeekAdapterBuilder::new_from_env().build()?;
    let client = ChatClient::new(backend, DeepSeekModel::Chat);

    let messages = [
        Message::system("You are a friendly AI assistant."),
        Message::user("Hi! Could you briefly explain what a chat-completion API is?"),
    ];

    let reply = client.generate(&messages).await?;
    println!("AI: {}", reply.content);

    if let Some(usage) = reply.usage() {
        write_usage(&mut std::io::stdout(), usage)?;
    }

    Ok(())
}
