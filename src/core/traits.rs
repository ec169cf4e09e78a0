use async_trait::async_trait;

use super::error::LlmError;

/// A one-shot chat completion backend.
///
/// Each call is independent: no history is carried between calls.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `user_text` and return the assistant's reply text.
    async fn complete(&self, user_text: &str) -> Result<String, LlmError>;
}
