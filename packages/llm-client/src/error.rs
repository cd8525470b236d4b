//! Error types for the LLM clients.

use thiserror::Error;

/// Result type for LLM client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// LLM client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential rejected (401/403) or absent
    #[error("Authentication error: {0}")]
    Auth(String),

    /// API error (non-2xx response, vendor error payload, empty completion)
    #[error("API error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LlmError {
    /// Map a non-success HTTP status and body to an error.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::Auth(message),
            _ => Self::Api {
                status: Some(status),
                message,
            },
        }
    }

    pub(crate) fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
