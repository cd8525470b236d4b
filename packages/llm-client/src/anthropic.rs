//! Anthropic messages API client.

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{LlmError, Result};
use crate::types::{self, Completion, MessagesRequest, MessagesResponseRaw};

/// Default Anthropic API root.
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Pure Anthropic API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a messages request; text blocks of the reply are concatenated.
    pub async fn messages(&self, request: MessagesRequest) -> Result<Completion> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Auth("Anthropic API key is empty".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                LlmError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Anthropic API error");
            return Err(LlmError::from_status(
                status.as_u16(),
                types::error_message(&error_text),
            ));
        }

        let body = response.text().await?;
        let completion = parse_messages_response(&body)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Anthropic messages completion"
        );

        Ok(completion)
    }
}

fn parse_messages_response(body: &str) -> Result<Completion> {
    let raw: MessagesResponseRaw =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;

    let content: String = raw
        .content
        .into_iter()
        .filter(|block| block.block_type == "text")
        .map(|block| block.text)
        .collect();

    if content.trim().is_empty() {
        return Err(LlmError::api("No text content from Anthropic"));
    }

    Ok(Completion {
        content,
        usage: raw.usage,
    })
}
