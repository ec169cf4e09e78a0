//! # groqchat
//!
//! One-shot chat completions against Groq's OpenAI-compatible API.
//!
//! Every call is a single stateless round trip: a fixed framing message plus the
//! user's text go out, the first choice's text comes back. There is no history,
//! no streaming and no retry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use groqchat::{GroqClient, GroqConfig, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GroqClient::new(GroqConfig::new(std::env::var("GROQ_API_KEY")?))?;
//!     let answer = client.complete("Explain ownership in one sentence.").await?;
//!     println!("Assistant: {answer}");
//!     Ok(())
//! }
//! ```
//!
//! The `groqchat` binary wraps this in a terminal loop (`groqchat chat`) or a small
//! web form (`groqchat serve`).

pub mod core;
pub mod credentials;
pub mod provider;
pub mod repl;
pub mod web;

pub use crate::core::{
    ChatRequest, ChatRole, ErrorKind, HttpClientConfig, LlmError, LlmProvider, Message, UserInput,
};
pub use credentials::{CredentialChain, CredentialProvider, EnvCredentials, KeyFileCredentials};
pub use provider::{GroqClient, GroqConfig, ReasoningEffort};

/// Send `user_text` to the default Groq endpoint with `api_key`.
///
/// Builds a fresh client for the call. Hold on to a [`GroqClient`] instead when
/// making more than one request.
pub async fn complete(user_text: &str, api_key: &str) -> Result<String, LlmError> {
    GroqClient::new(GroqConfig::new(api_key))?
        .complete(user_text)
        .await
}
