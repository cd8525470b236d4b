use research::ResearchBundle;
use serde::{Deserialize, Serialize};

use super::score::Score;
use crate::domains::projects::Project;
use crate::domains::scoring::error::ScoringError;

/// Model id that always selects heuristic scoring.
pub const DEMO_MODEL: &str = "demo";

/// A batch of projects to score with one template and model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub projects: Vec<Project>,
    /// Scoring template; the built-in template is used when absent
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ScoringRequest {
    /// True when no live evaluator should be called.
    pub fn is_demo(&self) -> bool {
        self.model.trim().eq_ignore_ascii_case(DEMO_MODEL) || self.credential().is_none()
    }

    /// Non-blank credential, if any.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

/// Outcome for one project of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub project_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScoringResult {
    pub fn scored(project_id: impl Into<String>, score: Score, research: Option<ResearchBundle>) -> Self {
        Self {
            project_id: project_id.into(),
            success: true,
            score: Some(score),
            research,
            error: None,
        }
    }

    pub fn failed(project_id: impl Into<String>, error: &ScoringError) -> Self {
        Self {
            project_id: project_id.into(),
            success: false,
            score: None,
            research: None,
            error: Some(error.to_string()),
        }
    }
}
