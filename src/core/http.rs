//! Single-attempt HTTP client shared by the provider implementations.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::error::LlmError;

/// Configuration for the outbound HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Total time allowed for one request, body included
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
        }
    }
}

/// Raw body of a successful response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Thin wrapper over `reqwest::Client` that issues exactly one attempt per call.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        let default_ua = format!("groqchat/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the raw response text on a 2xx status.
    ///
    /// Non-2xx statuses become [`LlmError::Http`] with the body preserved verbatim.
    /// Transport failures, timeouts included, become [`LlmError::Network`].
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req>(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<HttpResponse, LlmError>
    where
        Req: Serialize,
    {
        // `.json()` also sets `Content-Type: application/json`
        let mut req_builder = self.client.post(url).json(body);

        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "HTTP request failed");
            LlmError::Network {
                message: "Request failed".to_string(),
                source: Box::new(e),
            }
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|e| LlmError::Network {
            message: "Failed to read response body".to_string(),
            source: Box::new(e),
        })?;

        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            return Err(LlmError::Http {
                status_code: status.as_u16(),
                body: text,
            });
        }

        debug!(status = %status, bytes = text.len(), "HTTP request successful");

        Ok(HttpResponse {
            status: status.as_u16(),
            body: text,
        })
    }
}
