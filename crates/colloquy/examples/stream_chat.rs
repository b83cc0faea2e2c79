//! # Stream Chat – Interactive, Streamed Replies
//!
//! Like `multi_chat`, but the reply is printed chunk by chunk as it arrives
//! and the full text is appended to the history once the stream ends.
//! Any failure ends the session with a non-zero exit code.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=sk-…      # mandatory
//! RUST_LOG=colloquy_session=debug cargo run -p colloquy --example stream_chat
//! ```

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
        Some("You are a professional tech blogger.".to_string()),
    )
    .with_error_policy(ErrorPolicy::Fatal);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    conversation
        .run(stdin, &mut std::io::stdout(), RunOptions::streaming())
        .await?;

    Ok(())
}
