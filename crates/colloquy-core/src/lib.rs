//! Provider-agnostic building blocks for chat-completion programs.
//!
//! * [`message`] – the closed [`Role`](message::Role) set and the
//!   [`Message`](message::Message) type.
//! * [`history`] – an append-only [`History`](history::History) that refuses
//!   out-of-order roles.
//! * [`provider`] – the blocking and streaming traits a backend implements.
//! * [`ChatClient`] – binds a backend to a model and generation options.
pub mod client;
pub mod error;
pub mod history;
pub mod message;
pub mod model;
pub mod provider;

pub use client::ChatClient;
