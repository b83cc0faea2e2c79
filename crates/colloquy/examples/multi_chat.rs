//! # Multi Chat – Interactive, Blocking Replies
//!
//! A terminal conversation that keeps the whole history. Every reply is
//! printed once it is complete. A failed request is reported and the turn
//! is skipped, so one flaky call does not end the session.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example multi_chat
//! ```
//!
//! Type `exit` to quit.

use colloquy::{
    ChatClient,
    deepseek::DeepSeekAdapterBuilder,
    model::DeepSeekModel,
    session::{Conversation, ErrorPolicy, RunOptions},
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

    let mut conversation = Conversation::start(
        client,
        Some("You are a friendly AI assistant.".to_string()),
    )
    .with_error_policy(ErrorPolicy::SkipTurn);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    conversation
        .run(stdin, &mut std::io::stdout(), RunOptions::blocking())
        .await?;

    Ok(())
}
