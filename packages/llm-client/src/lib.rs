//! Pure LLM REST API clients
//!
//! Minimal OpenAI chat-completions and Anthropic messages clients with no
//! domain-specific logic. Both return the raw completion text; interpreting
//! it is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_client::{ChatRequest, Message, OpenAIClient};
//!
//! let client = OpenAIClient::new(api_key);
//! let completion = client
//!     .chat_completion(
//!         ChatRequest::new("gpt-4o")
//!             .message(Message::user("Hello!"))
//!             .temperature(0.1)
//!             .output_limit(4000),
//!     )
//!     .await?;
//! ```

pub mod anthropic;
pub mod error;
pub mod types;

pub use anthropic::AnthropicClient;
pub use error::{LlmError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

/// Default OpenAI API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Send messages to the chat completion API and get the first choice back.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<Completion> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::Auth("OpenAI API key is empty".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                LlmError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(LlmError::from_status(
                status.as_u16(),
                types::error_message(&error_text),
            ));
        }

        let body = response.text().await?;
        let content = parse_chat_response(&body)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(content)
    }
}

/// Pull the first choice's text out of a chat completion body.
fn parse_chat_response(body: &str) -> Result<Completion> {
    let raw: types::ChatResponseRaw =
        serde_json::from_str(body).map_err(|e| LlmError::Parse(e.to_string()))?;

    let content = raw
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| LlmError::api("No response from OpenAI"))?;

    Ok(Completion {
        content,
        usage: raw.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_client_builder() {
        let client = OpenAIClient::new("sk-test").with_base_url("https://custom.api.com/");
        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
    }

    #[test]
    fn test_parse_chat_response() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"a\":1}"}}],"usage":{"prompt_tokens":5,"completion_tokens":2,"total_tokens":7}}"#;
        let completion = parse_chat_response(body).unwrap();
        assert_eq!(completion.content, "{\"a\":1}");
        assert_eq!(completion.usage.unwrap().completion_tokens, 2);
    }

    #[test]
    fn test_empty_choices_is_api_error() {
        assert!(matches!(
            parse_chat_response(r#"{"choices":[]}"#),
            Err(LlmError::Api { .. })
        ));
        assert!(matches!(parse_chat_response("<html>"), Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_chat_completion_round_trip() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"scored"}}]}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-test").with_base_url(server.url());
        let completion = client
            .chat_completion(ChatRequest::new("gpt-4o").message(Message::user("hi")))
            .await
            .unwrap();
        assert_eq!(completion.content, "scored");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new("sk-bad").with_base_url(server.url());
        let err = client
            .chat_completion(ChatRequest::new("gpt-4o").message(Message::user("hi")))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Auth(ref m) if m == "Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_blank_key_fails_without_request() {
        let client = OpenAIClient::new("  ").with_base_url("http://127.0.0.1:1");
        let err = client
            .chat_completion(ChatRequest::new("gpt-4o"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
    }
}
