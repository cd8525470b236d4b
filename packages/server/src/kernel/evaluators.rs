//! Live evaluator backed by the OpenAI and Anthropic clients.

use async_trait::async_trait;
use llm_client::{AnthropicClient, ChatRequest, LlmError, Message, MessagesRequest, OpenAIClient};
use tracing::info;

use crate::kernel::BaseEvaluator;

/// Default completion bound.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// LLM vendor serving a model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    OpenAI,
    Anthropic,
}

impl Vendor {
    /// Resolve a vendor from a model id; unknown families resolve to `None`.
    pub fn for_model(model: &str) -> Option<Self> {
        let model = model.trim().to_lowercase();
        if model.starts_with("gpt-")
            || model.starts_with("o1")
            || model.starts_with("o3")
            || model.starts_with("o4")
        {
            Some(Vendor::OpenAI)
        } else if model.starts_with("claude-") {
            Some(Vendor::Anthropic)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Vendor::OpenAI => "openai",
            Vendor::Anthropic => "anthropic",
        }
    }
}

/// Routes each call to the vendor serving the requested model.
///
/// Credentials arrive per call, so vendor clients are built per request on
/// top of one shared HTTP client.
#[derive(Clone)]
pub struct LlmEvaluator {
    http: reqwest::Client,
    max_tokens: u32,
    temperature: f32,
    openai_base_url: Option<String>,
    anthropic_base_url: Option<String>,
}

impl LlmEvaluator {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            openai_base_url: None,
            anthropic_base_url: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_openai_base_url(mut self, url: Option<String>) -> Self {
        self.openai_base_url = url;
        self
    }

    pub fn with_anthropic_base_url(mut self, url: Option<String>) -> Self {
        self.anthropic_base_url = url;
        self
    }

    async fn openai(&self, prompt: &str, model: &str, credential: &str) -> llm_client::Result<String> {
        let mut client = OpenAIClient::new(credential).with_http_client(self.http.clone());
        if let Some(url) = &self.openai_base_url {
            client = client.with_base_url(url.clone());
        }

        let request = ChatRequest::new(model)
            .message(Message::user(prompt))
            .temperature(self.temperature)
            .output_limit(self.max_tokens);

        Ok(client.chat_completion(request).await?.content)
    }

    async fn anthropic(&self, prompt: &str, model: &str, credential: &str) -> llm_client::Result<String> {
        let mut client = AnthropicClient::new(credential).with_http_client(self.http.clone());
        if let Some(url) = &self.anthropic_base_url {
            client = client.with_base_url(url.clone());
        }

        let request =
            MessagesRequest::new(model, prompt, self.max_tokens).temperature(self.temperature);

        Ok(client.messages(request).await?.content)
    }
}

#[async_trait]
impl BaseEvaluator for LlmEvaluator {
    async fn evaluate(
        &self,
        prompt: &str,
        model: &str,
        credential: &str,
    ) -> llm_client::Result<String> {
        let vendor = Vendor::for_model(model)
            .ok_or_else(|| LlmError::Config(format!("unsupported model: {model}")))?;

        if credential.trim().is_empty() {
            return Err(LlmError::Auth(format!("no {} API key supplied", vendor.name())));
        }

        info!(vendor = vendor.name(), model = %model, prompt_bytes = prompt.len(), "Calling evaluator");

        match vendor {
            Vendor::OpenAI => self.openai(prompt, model, credential).await,
            Vendor::Anthropic => self.anthropic(prompt, model, credential).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_resolution() {
        assert_eq!(Vendor::for_model("gpt-4o"), Some(Vendor::OpenAI));
        assert_eq!(Vendor::for_model("o3-mini"), Some(Vendor::OpenAI));
        assert_eq!(Vendor::for_model("claude-3-5-sonnet-latest"), Some(Vendor::Anthropic));
        assert_eq!(Vendor::for_model("llama-3"), None);
        assert_eq!(Vendor::for_model(""), None);
    }

    #[tokio::test]
    async fn test_unknown_model_is_config_error() {
        let evaluator = LlmEvaluator::new(reqwest::Client::new());
        let err = evaluator.evaluate("p", "mistral-large", "key").await.unwrap_err();
        assert!(matches!(err, LlmError::Config(_)));
    }

    #[tokio::test]
    async fn test_blank_credential_is_auth_error() {
        let evaluator = LlmEvaluator::new(reqwest::Client::new());
        let err = evaluator.evaluate("p", "gpt-4o", " ").await.unwrap_err();
        assert!(matches!(err, LlmError::Auth(_)));
    }
}
