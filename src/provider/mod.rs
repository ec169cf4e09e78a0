pub(crate) mod constants;
pub(crate) mod groq;

pub use constants::groq as defaults;
pub use groq::{GroqClient, GroqConfig, ReasoningEffort};
