//! Groq chat-completions provider.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint. Every call is a
//! single stateless round trip: the framing message, the user's text, and a fixed
//! set of sampling parameters taken from [`GroqConfig`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    ChatRequest, ChatRole, HttpClient, HttpClientConfig, LlmError, LlmProvider, Message,
};
use crate::provider::constants::groq;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    #[default]
    Medium,
    High,
}

/// Immutable settings for [`GroqClient`].
///
/// Defaults reproduce the fixed wire contract; the `with_*` setters exist so tests
/// can point the client at a mock server or shorten the timeout.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Message sent ahead of the user's text on every call
    pub framing_prompt: String,
    /// Role the framing message is sent with (the endpoint has always received `assistant`)
    pub framing_role: ChatRole,
    pub temperature: f32,
    pub top_p: f32,
    pub max_completion_tokens: u32,
    pub reasoning_effort: ReasoningEffort,
    pub http_config: HttpClientConfig,
    pub user_agent: Option<String>,
}

impl GroqConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: groq::API_BASE.to_string(),
            model: groq::DEFAULT_MODEL.to_string(),
            framing_prompt: groq::DEFAULT_SYSTEM_PROMPT.to_string(),
            framing_role: ChatRole::Assistant,
            temperature: groq::DEFAULT_TEMPERATURE,
            top_p: groq::DEFAULT_TOP_P,
            max_completion_tokens: groq::DEFAULT_MAX_COMPLETION_TOKENS,
            reasoning_effort: ReasoningEffort::default(),
            http_config: HttpClientConfig::default(),
            user_agent: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_framing(mut self, role: ChatRole, prompt: impl Into<String>) -> Self {
        self.framing_role = role;
        self.framing_prompt = prompt.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_max_completion_tokens(mut self, max_completion_tokens: u32) -> Self {
        self.max_completion_tokens = max_completion_tokens;
        self
    }

    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = effort;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            groq::CHAT_COMPLETIONS_ENDPOINT
        )
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }

    fn framing_message(&self) -> Message {
        Message {
            role: self.framing_role,
            content: self.framing_prompt.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
    reasoning_effort: ReasoningEffort,
    /// Always serialized, as `null` when unset
    stop: Option<Vec<String>>,
}

impl ChatCompletionRequest {
    fn new(config: &GroqConfig, request: &ChatRequest) -> Self {
        Self {
            model: config.model.clone(),
            messages: request.messages(),
            temperature: config.temperature,
            max_completion_tokens: config.max_completion_tokens,
            top_p: config.top_p,
            stream: false,
            reasoning_effort: config.reasoning_effort,
            stop: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Turn a 2xx body into reply text.
///
/// No choices is not an error: the raw body is handed back inside a placeholder.
/// A missing or empty `content` becomes `(Empty response)`.
fn extract_reply(raw: &str) -> Result<String, LlmError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(raw).map_err(|e| LlmError::Parse {
            message: "Failed to parse chat completion response".to_string(),
            source: Box::new(e),
        })?;

    let Some(first) = response.choices.into_iter().next() else {
        return Ok(format!("No response choices returned. Raw response: {raw}"));
    };

    Ok(first
        .message
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| groq::EMPTY_RESPONSE_PLACEHOLDER.to_string()))
}

pub struct GroqClient {
    config: GroqConfig,
    http: HttpClient,
}

impl GroqClient {
    pub fn new(config: GroqConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration(format!(
                "{} is empty or not set.",
                groq::API_KEY_ENV_VAR
            )));
        }

        let http = HttpClient::new(&config.http_config, config.user_agent.as_deref())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

#[async_trait]
impl LlmProvider for GroqClient {
    #[tracing::instrument(
        name = "groq_complete",
        skip(self, user_text),
        fields(model = %self.config.model, chars = user_text.len()),
        err
    )]
    async fn complete(&self, user_text: &str) -> Result<String, LlmError> {
        let request = ChatRequest::new(self.config.framing_message(), user_text)?;
        let payload = ChatCompletionRequest::new(&self.config, &request);

        let url = self.config.endpoint_url();
        let headers = vec![self.config.auth_header()];

        let response = self.http.post_json(&url, &headers, &payload).await?;
        debug!(status = response.status, "Chat completion received");

        extract_reply(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_fixed_wire_shape() {
        let config = GroqConfig::new("gsk_test");
        let request = ChatRequest::new(config.framing_message(), "Hello there").unwrap();
        let payload = serde_json::to_value(ChatCompletionRequest::new(&config, &request)).unwrap();

        assert_eq!(payload["model"], "openai/gpt-oss-120b");
        assert_eq!(payload["messages"][0]["role"], "assistant");
        assert_eq!(
            payload["messages"][0]["content"],
            "Be a straightforward assistant"
        );
        assert_eq!(payload["messages"][1]["role"], "user");
        assert_eq!(payload["messages"][1]["content"], "Hello there");
        assert_eq!(payload["temperature"].as_f64(), Some(1.0));
        assert_eq!(payload["top_p"].as_f64(), Some(1.0));
        assert_eq!(payload["max_completion_tokens"], 8192);
        assert_eq!(payload["stream"], false);
        assert_eq!(payload["reasoning_effort"], "medium");
        assert!(payload["stop"].is_null());
        assert!(payload.as_object().unwrap().contains_key("stop"));
    }

    #[test]
    fn endpoint_url_joins_base_and_path() {
        assert_eq!(
            GroqConfig::new("k").endpoint_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(
            GroqConfig::new("k")
                .with_base_url("http://127.0.0.1:9000/")
                .endpoint_url(),
            "http://127.0.0.1:9000/chat/completions"
        );
    }

    #[test]
    fn client_keeps_injected_config_with_default_timeout() {
        let client = GroqClient::new(GroqConfig::new("gsk_test")).unwrap();

        assert_eq!(
            client.config().http_config.timeout,
            std::time::Duration::from_secs(120)
        );
        assert_eq!(client.config().model, "openai/gpt-oss-120b");
        assert_eq!(client.config().api_key, "gsk_test");
    }

    #[test]
    fn client_rejects_blank_api_key() {
        let result = GroqClient::new(GroqConfig::new("   "));
        assert!(matches!(result, Err(LlmError::Configuration(_))));
    }

    #[test]
    fn extract_reply_returns_first_choice_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Hi!"}},{"message":{"content":"ignored"}}]}"#;
        assert_eq!(extract_reply(raw).unwrap(), "Hi!");
    }

    #[test]
    fn extract_reply_degrades_on_missing_content() {
        for raw in [
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{}]}"#,
        ] {
            assert_eq!(extract_reply(raw).unwrap(), "(Empty response)", "{raw}");
        }
    }

    #[test]
    fn extract_reply_embeds_raw_body_when_no_choices() {
        let raw = r#"{"id":"chatcmpl-1","choices":[]}"#;
        let text = extract_reply(raw).unwrap();
        assert!(text.starts_with("No response choices returned."));
        assert!(text.contains(raw));

        let missing = r#"{"id":"chatcmpl-2"}"#;
        assert!(extract_reply(missing).unwrap().contains(missing));
    }

    #[test]
    fn extract_reply_fails_on_non_json() {
        assert!(matches!(
            extract_reply("not json"),
            Err(LlmError::Parse { .. })
        ));
    }
}
