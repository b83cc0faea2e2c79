//! # Model Config – Tuning Generation Parameters
//!
//! Three blocking requests, each with its own client settings:
//!
//! 1. **basic** – defaults only.
//! 2. **advanced** – 30 s timeout, moderate temperature, a token limit,
//!    stop sequences and repetition penalties.
//! 3. **creative** – high temperature for story writing.
//!
//! Each reply is followed by its token usage, including prompt tokens served
//! from the cache.
//!
//! ```bash
//! export DEEPSEEK_API_KEY=sk-…      # mandatory
//! cargo run -p colloquy --example model_config
//! ```

use std::time::Duration;

use colloquy::{
    ChatClient,
    deepseek::{DeepSeekAdapter, DeepSeekAdapterBuilder},
    message::Message,
    model::DeepSeekModel,
    provider::GenerationOptions,
    session::write_usage,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("=== 1: basic settings ===");
    let backend = DeepSeekAdapterBuilder::new_from_env().build()?;
    ask(
        ChatClient::new(backend, DeepSeekModel::Chat),
        "You are a friendly AI assistant.",
        "Describe the Rust borrow checker in one sentence.",
    )
    .await?;

    println!("\n=== 2: advanced settings ===");
    let backend = DeepSeekAdapterBuilder::new_from_env()
        .with_timeout(Duration::from_secs(30))
        .build()?;
    let options = GenerationOptions::new()
        .with_temperature(0.7)
        .with_top_p(0.9)
        .with_max_tokens(500)
        .with_stop(["\n\n", "Summary:"])
        .with_presence_penalty(0.6)
        .with_frequency_penalty(0.5);
    ask(
        ChatClient::new(backend, DeepSeekModel::Chat).with_options(options),
        "You are an expert technical writer.",
        "Explain the core features of async Rust: its architecture, building blocks and strengths.",
    )
    .await?;

    println!("\n=== 3: creative settings ===");
    let backend = DeepSeekAdapterBuilder::new_from_env().build()?;
    let options = GenerationOptions::new()
        .with_temperature(1.2)
        .with_top_p(0.95)
        .with_max_tokens(800)
        .with_presence_penalty(0.3)
        .with_frequency_penalty(0.3);
    ask(
        ChatClient::new(backend, DeepSeekModel::Chat).with_options(options),
        "You are a highly creative story writer.",
        "Write the opening of a fun story about a software library that becomes a superhero.",
    )
    .await?;

    Ok(())
}

async fn ask(client: ChatClient<DeepSeekAdapter>, system: &str, user: &str) -> anyhow::Result<()> {
    let reply = client
        .generate(&[Message::system(system), Message::user(user)])
        .await?;

    println!("AI: {}", reply.content);
    if let Some(usage) = reply.usage() {
        write_usage(&mut std::io::stdout(), usage)?;
    }
    Ok(())
}
