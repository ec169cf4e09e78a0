use serde::Deserialize;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered with a non-2xx status. `body` is kept verbatim.
    #[error("HTTP error {status_code}: {body}")]
    Http { status_code: u16, body: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: BoxError,
    },
}

/// Coarse classification of an [`LlmError`], for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidInput,
    Http,
    Network,
    Parse,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl LlmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::Configuration(_) => ErrorKind::Configuration,
            LlmError::InvalidInput(_) => ErrorKind::InvalidInput,
            LlmError::Http { .. } => ErrorKind::Http,
            LlmError::Network { .. } => ErrorKind::Network,
            LlmError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Human-facing detail string.
    ///
    /// For HTTP errors this is the provider's nested `error.message` when the body
    /// carries one, otherwise the raw body.
    pub fn detail(&self) -> String {
        match self {
            LlmError::Http { body, .. } => serde_json::from_str::<ErrorEnvelope>(body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| body.clone()),
            LlmError::Network { message, source } | LlmError::Parse { message, source } => {
                format!("{message}: {source}")
            }
            LlmError::Configuration(message) | LlmError::InvalidInput(message) => message.clone(),
        }
    }

    /// True when a transport failure was caused by the request timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            LlmError::Network { source, .. } => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            _ => false,
        }
    }
}
