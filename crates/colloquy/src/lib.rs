//! # `colloquy` – The umbrella crate
//!
//! One dependency line for the whole workspace:
//!
//! | Crate                   | What it provides                                                        |
//! |-------------------------|-------------------------------------------------------------------------|
//! | **`colloquy-core`**     | `Message`, `Role`, `History`, provider traits, `ChatClient`, errors      |
//! | **`colloquy-session`**  | The interactive loop: `Conversation`, error policies, `run`             |
//! | **`colloquy-deepseek`** | HTTP backend for the DeepSeek chat-completions API *(optional)*         |
//!
//! The `deepseek` feature is on by default. Turn it off to stay provider
//! agnostic and bring your own [`provider::ChatCompletionProvider`].
//! The `tracing` feature enables request logging inside the backend.
//!
//! ## Quick example
//!
//! ```rust,no_run
//! use colloquy::{
//!     ChatClient,
//!     deepseek::DeepSeekAdapterBuilder,
//!     model::DeepSeekModel,
//!     session::{Conversation, ErrorPolicy, RunOptions},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = DeepSeekAdapterBuilder::new_from_env().build()?;
//!     let client = ChatClient::new(backend, DeepSeekModel::Chat);
//!
//!     let mut conversation = Conversation::start(client, Some("You are a helpful assistant.".into()))
//!         .with_error_policy(ErrorPolicy::SkipTurn);
//!
//!     let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//!     conversation
//!         .run(stdin, &mut std::io::stdout(), RunOptions::streaming())
//!         .await?;
//!     Ok(())
//! }
//! ```
#![doc(html_root_url = "https://docs.rs/colloquy/latest")]

pub use colloquy_core::*;
pub use colloquy_session as session;

#[cfg(feature = "deepseek")]
pub use colloquy_deepseek as deepseek;
