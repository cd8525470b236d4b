//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by the scoring
//! and report actions. All external services use trait abstractions to enable
//! testing.

use std::sync::Arc;

use anyhow::{Context, Result};
use research::ResearchAggregator;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::domains::scoring::heuristic::HeuristicScorer;
use crate::domains::scoring::prompt::PromptComposer;
use crate::kernel::evaluators::LlmEvaluator;
use crate::kernel::search::build_research_aggregator;
use crate::kernel::stores::{MemoryScoreStore, PostgresScoreStore};
use crate::kernel::world_bank::WorldBankClient;
use crate::kernel::{BaseEvaluator, BaseProjectSource, BaseScoreStore};

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    /// Facet research over the configured search chain
    pub research: ResearchAggregator,
    pub evaluator: Arc<dyn BaseEvaluator>,
    pub project_source: Arc<dyn BaseProjectSource>,
    pub score_store: Arc<dyn BaseScoreStore>,
    pub heuristic: HeuristicScorer,
    pub prompt_composer: PromptComposer,
    /// Projects scored at once; 1 keeps batches strictly sequential
    pub scoring_concurrency: usize,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        research: ResearchAggregator,
        evaluator: Arc<dyn BaseEvaluator>,
        project_source: Arc<dyn BaseProjectSource>,
        score_store: Arc<dyn BaseScoreStore>,
    ) -> Self {
        Self {
            research,
            evaluator,
            project_source,
            score_store,
            heuristic: HeuristicScorer::new(),
            prompt_composer: PromptComposer::new(),
            scoring_concurrency: 1,
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicScorer) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_prompt_composer(mut self, composer: PromptComposer) -> Self {
        self.prompt_composer = composer;
        self
    }

    pub fn with_scoring_concurrency(mut self, concurrency: usize) -> Self {
        self.scoring_concurrency = concurrency.max(1);
        self
    }

    /// Wire the production adapters from configuration.
    ///
    /// A database pool selects the PostgreSQL score store; without one
    /// scores live in memory.
    pub fn from_config(config: &Config, db_pool: Option<PgPool>) -> Result<Self> {
        let research = build_research_aggregator(config)?;

        let evaluator_http = reqwest::Client::builder()
            .timeout(config.evaluator_timeout)
            .build()
            .context("Failed to build evaluator HTTP client")?;
        let evaluator = LlmEvaluator::new(evaluator_http)
            .with_max_tokens(config.evaluator_max_tokens)
            .with_temperature(config.evaluator_temperature)
            .with_openai_base_url(config.openai_base_url.clone())
            .with_anthropic_base_url(config.anthropic_base_url.clone());

        let source_http = reqwest::Client::builder()
            .timeout(config.search_timeout)
            .build()
            .context("Failed to build project source HTTP client")?;
        let project_source =
            WorldBankClient::new(source_http).with_base_url(config.world_bank_api_url.clone());

        let score_store: Arc<dyn BaseScoreStore> = match db_pool {
            Some(pool) => {
                info!("Using PostgreSQL score store");
                Arc::new(PostgresScoreStore::new(pool))
            }
            None => {
                info!("DATABASE_URL not set, using in-memory score store");
                Arc::new(MemoryScoreStore::new())
            }
        };

        Ok(Self::new(
            research,
            Arc::new(evaluator),
            Arc::new(project_source),
            score_store,
        )
        .with_heuristic(HeuristicScorer::with_seed(config.demo_seed))
        .with_scoring_concurrency(config.scoring_concurrency))
    }
}
