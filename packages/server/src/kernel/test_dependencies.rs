// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use research::testing::MockSearchBackend;
use research::{ResearchAggregator, ResearchBundle, SearchFallbackChain};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::stores::MemoryScoreStore;
use super::{BaseEvaluator, BaseProjectSource, BaseScoreStore, ServerDeps, StoredScore};
use crate::domains::projects::{ProjectPage, ProjectQuery};
use crate::domains::scoring::heuristic::HeuristicScorer;
use crate::domains::scoring::models::Score;

/// A well-formed evaluator reply (tech 8, foresight 6, collective 5).
pub const VALID_SCORE_JSON: &str = r#"{
  "emerging_tech": {"score": 8, "technologies": ["IoT sensors"], "applications": ["Network monitoring"], "evidence": "Sensor pilots are under way."},
  "foresight": {"score": 6, "disruptions": ["Climate volatility"], "horizon": "medium-term", "evidence": "Demand patterns are shifting."},
  "collective_intelligence": {"score": 5, "ecosystem_activity": "medium", "examples": ["National hackathon"], "evidence": "A small startup scene exists."},
  "relevance": {"score": 7, "rationale": "Directly applicable."},
  "top_opportunities": [{"opportunity": "Sensor pilot", "dimension": "emerging_tech", "approach": "Proof of Value"}],
  "key_insight": "Pilot sensors before scaling."
}"#;

// =============================================================================
// Mock Evaluator
// =============================================================================

/// Arguments captured from an evaluate call
#[derive(Debug, Clone)]
pub struct EvaluateCall {
    pub prompt: String,
    pub model: String,
    pub credential: String,
}

pub struct MockEvaluator {
    responses: Arc<Mutex<Vec<llm_client::Result<String>>>>,
    calls: Arc<Mutex<Vec<EvaluateCall>>>,
}

impl MockEvaluator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push(Ok(text.to_string()));
        self
    }

    /// Add a failure to the queue
    pub fn with_error(self, error: llm_client::LlmError) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    /// Get all calls made to the evaluator
    pub fn calls(&self) -> Vec<EvaluateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseEvaluator for MockEvaluator {
    async fn evaluate(
        &self,
        prompt: &str,
        model: &str,
        credential: &str,
    ) -> llm_client::Result<String> {
        self.calls.lock().unwrap().push(EvaluateCall {
            prompt: prompt.to_string(),
            model: model.to_string(),
            credential: credential.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if !responses.is_empty() {
            responses.remove(0)
        } else {
            Ok(VALID_SCORE_JSON.to_string())
        }
    }
}

// =============================================================================
// Mock Project Source
// =============================================================================

pub struct MockProjectSource {
    page: ProjectPage,
    fail: bool,
    queries: Arc<Mutex<Vec<ProjectQuery>>>,
}

impl MockProjectSource {
    pub fn new() -> Self {
        Self {
            page: ProjectPage::default(),
            fail: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page(mut self, page: ProjectPage) -> Self {
        self.page = page;
        self
    }

    /// Every search fails
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn queries(&self) -> Vec<ProjectQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockProjectSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseProjectSource for MockProjectSource {
    async fn search(&self, query: &ProjectQuery) -> Result<ProjectPage> {
        self.queries.lock().unwrap().push(query.clone());
        if self.fail {
            anyhow::bail!("project source unavailable");
        }
        Ok(self.page.clone())
    }
}

// =============================================================================
// Failing Score Store
// =============================================================================

/// Score store whose writes always fail; reads return nothing.
#[derive(Default)]
pub struct FailingScoreStore {
    attempts: Mutex<usize>,
}

impl FailingScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl BaseScoreStore for FailingScoreStore {
    async fn put(&self, project_id: &str, _: &Score, _: Option<&ResearchBundle>) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        anyhow::bail!("store offline while saving {project_id}")
    }

    async fn get(&self, _: &[String]) -> Result<HashMap<String, StoredScore>> {
        Ok(HashMap::new())
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

pub struct TestDependencies {
    pub evaluator: Arc<MockEvaluator>,
    pub project_source: Arc<MockProjectSource>,
    pub score_store: Arc<dyn BaseScoreStore>,
    pub search: Arc<MockSearchBackend>,
    pub heuristic: HeuristicScorer,
    pub scoring_concurrency: usize,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            evaluator: Arc::new(MockEvaluator::new()),
            project_source: Arc::new(MockProjectSource::new()),
            score_store: Arc::new(MemoryScoreStore::new()),
            search: Arc::new(MockSearchBackend::new("mock")),
            heuristic: HeuristicScorer::seeded(42),
            scoring_concurrency: 1,
        }
    }

    /// Set a mock evaluator
    pub fn mock_evaluator(mut self, evaluator: MockEvaluator) -> Self {
        self.evaluator = Arc::new(evaluator);
        self
    }

    /// Set a mock project source
    pub fn mock_project_source(mut self, source: MockProjectSource) -> Self {
        self.project_source = Arc::new(source);
        self
    }

    /// Set a mock search backend
    pub fn mock_search(mut self, backend: MockSearchBackend) -> Self {
        self.search = Arc::new(backend);
        self
    }

    pub fn score_store(mut self, store: Arc<dyn BaseScoreStore>) -> Self {
        self.score_store = store;
        self
    }

    pub fn scoring_concurrency(mut self, concurrency: usize) -> Self {
        self.scoring_concurrency = concurrency;
        self
    }

    /// Convert into ServerDeps for testing. Research runs without pacing.
    pub fn into_server_deps(&self) -> ServerDeps {
        let chain = SearchFallbackChain::new().with_backend(self.search.clone());
        let research = ResearchAggregator::new(chain).with_query_delay(Duration::ZERO);

        ServerDeps::new(
            research,
            self.evaluator.clone(),
            self.project_source.clone(),
            self.score_store.clone(),
        )
        .with_heuristic(self.heuristic.clone())
        .with_scoring_concurrency(self.scoring_concurrency)
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
