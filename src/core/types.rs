use serde::{Deserialize, Serialize};

use super::error::LlmError;

/// Word that ends a chat session. Compared case-insensitively after trimming.
pub const QUIT_SENTINEL: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: String,
}

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    Quit,
    Empty,
    Prompt(String),
}

impl UserInput {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            UserInput::Empty
        } else if trimmed.eq_ignore_ascii_case(QUIT_SENTINEL) {
            UserInput::Quit
        } else {
            UserInput::Prompt(trimmed.to_string())
        }
    }
}

/// A validated one-shot request: the framing message followed by the user's text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub framing: Message,
    pub user_text: String,
}

impl ChatRequest {
    /// Rejects text that is blank or the quit sentinel; neither is ever sent upstream.
    pub fn new(framing: Message, user_text: &str) -> Result<Self, LlmError> {
        match UserInput::parse(user_text) {
            UserInput::Empty => Err(LlmError::InvalidInput(
                "User text must not be empty.".to_string(),
            )),
            UserInput::Quit => Err(LlmError::InvalidInput(format!(
                "'{QUIT_SENTINEL}' ends the session and is not sent to the model."
            ))),
            UserInput::Prompt(_) => Ok(Self {
                framing,
                user_text: user_text.to_string(),
            }),
        }
    }

    pub fn messages(&self) -> Vec<Message> {
        vec![
            self.framing.clone(),
            Message {
                role: ChatRole::User,
                content: self.user_text.clone(),
            },
        ]
    }
}
