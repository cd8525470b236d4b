//! Scoring error taxonomy.

use llm_client::LlmError;
use thiserror::Error;

/// Why a batch or a single project could not be scored.
///
/// `Config` rejects a whole batch before any work starts; every other
/// variant is confined to the project it occurred on.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Evaluator rejected the credential: {0}")]
    Auth(String),

    #[error("Evaluator error: {0}")]
    Upstream(String),

    #[error("Evaluator unreachable: {0}")]
    Transport(String),

    #[error("Malformed evaluator response: {0}")]
    MalformedResponse(String),

    #[error("Score is missing required fields: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("scoring cancelled")]
    Cancelled,
}

impl ScoringError {
    pub fn is_config(&self) -> bool {
        matches!(self, ScoringError::Config(_))
    }
}

impl From<LlmError> for ScoringError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Config(msg) => ScoringError::Config(msg),
            LlmError::Auth(msg) => ScoringError::Auth(msg),
            LlmError::Api { .. } => ScoringError::Upstream(e.to_string()),
            LlmError::Network(msg) => ScoringError::Transport(msg),
            LlmError::Parse(msg) => ScoringError::Upstream(format!("unreadable response envelope: {msg}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_errors_map_to_taxonomy() {
        assert!(matches!(
            ScoringError::from(LlmError::Auth("bad key".into())),
            ScoringError::Auth(_)
        ));
        assert!(matches!(
            ScoringError::from(LlmError::Network("timed out".into())),
            ScoringError::Transport(_)
        ));
        assert!(matches!(
            ScoringError::from(LlmError::Parse("eof".into())),
            ScoringError::Upstream(_)
        ));
    }

    #[test]
    fn test_messages() {
        let err = ScoringError::Schema(vec!["foresight.score".into(), "relevance.score".into()]);
        assert_eq!(
            err.to_string(),
            "Score is missing required fields: foresight.score, relevance.score"
        );
        assert_eq!(ScoringError::Cancelled.to_string(), "scoring cancelled");
    }
}
