pub mod groq {
    pub const API_BASE: &str = "https://api.groq.com/openai/v1";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const API_KEY_ENV_VAR: &str = "GROQ_API_KEY";
    /// Bare keys found in key files start with this prefix.
    pub const API_KEY_PREFIX: &str = "gsk_";
    pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
    pub const DEFAULT_SYSTEM_PROMPT: &str = "Be a straightforward assistant";
    pub const DEFAULT_TEMPERATURE: f32 = 1.0;
    pub const DEFAULT_TOP_P: f32 = 1.0;
    pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 8192;
    pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "(Empty response)";
}
