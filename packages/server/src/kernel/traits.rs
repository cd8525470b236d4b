// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Scoring, extraction and report logic are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEvaluator, BaseScoreStore)

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use research::ResearchBundle;
use serde::{Deserialize, Serialize};

use crate::domains::projects::{ProjectPage, ProjectQuery};
use crate::domains::scoring::models::Score;

// =============================================================================
// Evaluator Trait (Infrastructure - LLM completion by model id)
// =============================================================================

#[async_trait]
pub trait BaseEvaluator: Send + Sync {
    /// Send a prompt to the vendor serving `model` and return the raw text.
    ///
    /// Never interprets the response.
    async fn evaluate(
        &self,
        prompt: &str,
        model: &str,
        credential: &str,
    ) -> llm_client::Result<String>;
}

// =============================================================================
// Project Source Trait (Infrastructure - upstream project search)
// =============================================================================

#[async_trait]
pub trait BaseProjectSource: Send + Sync {
    /// Fetch one page of projects matching the query.
    async fn search(&self, query: &ProjectQuery) -> Result<ProjectPage>;
}

// =============================================================================
// Score Store Trait (Infrastructure - persisted scores keyed by project id)
// =============================================================================

/// A persisted score with the research it was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScore {
    pub project_id: String,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchBundle>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait BaseScoreStore: Send + Sync {
    /// Insert or replace the score for a project.
    async fn put(
        &self,
        project_id: &str,
        score: &Score,
        research: Option<&ResearchBundle>,
    ) -> Result<()>;

    /// Stored scores for the given ids; unknown ids are absent from the map.
    async fn get(&self, project_ids: &[String]) -> Result<HashMap<String, StoredScore>>;
}
