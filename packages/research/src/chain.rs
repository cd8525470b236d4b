//! Fallback chain over several search backends.
//!
//! Backends are tried in priority order. The first backend that returns a
//! non-empty result set wins. An empty set means "try the next one"; an
//! error is logged and also means "try the next one". When every backend is
//! exhausted the chain answers with an empty set, so callers never see a
//! failure from research.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{BackendResult, SearchBackendError};
use crate::traits::searcher::{SearchBackend, SearchResult};

/// What one backend produced for one query.
#[derive(Debug)]
pub enum BackendOutcome {
    /// Non-empty results; stops the chain.
    Hit(Vec<SearchResult>),
    /// Provider answered with nothing; continue.
    Empty,
    /// Provider failed; continue.
    Failed(SearchBackendError),
}

impl From<BackendResult<Vec<SearchResult>>> for BackendOutcome {
    fn from(result: BackendResult<Vec<SearchResult>>) -> Self {
        match result {
            Ok(results) if results.is_empty() => Self::Empty,
            Ok(results) => Self::Hit(results),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Ordered list of backends with first-non-empty-wins semantics.
#[derive(Clone, Default)]
pub struct SearchFallbackChain {
    backends: Vec<Arc<dyn SearchBackend>>,
}

impl SearchFallbackChain {
    /// Create an empty chain. An empty chain always answers with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a backend at the lowest priority.
    pub fn with_backend(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    /// Names of the configured backends, in priority order.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Run `query` through the chain. Never fails.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        for backend in &self.backends {
            match BackendOutcome::from(backend.search(query, limit).await) {
                BackendOutcome::Hit(mut results) => {
                    results.truncate(limit);
                    debug!(
                        backend = backend.name(),
                        count = results.len(),
                        query = %query,
                        "Search backend returned results"
                    );
                    return results;
                }
                BackendOutcome::Empty => {
                    debug!(backend = backend.name(), query = %query, "Search backend empty, trying next");
                }
                BackendOutcome::Failed(e) => {
                    warn!(backend = backend.name(), error = %e, query = %query, "Search backend failed, trying next");
                }
            }
        }

        warn!(query = %query, "All search backends exhausted");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingBackend, MockSearchBackend};

    fn three_results() -> Vec<SearchResult> {
        (1..=3)
            .map(|i| SearchResult::new(format!("T{i}"), format!("D{i}"), format!("https://{i}.org")))
            .collect()
    }

    #[tokio::test]
    async fn test_empty_backend_falls_through() {
        let first = Arc::new(MockSearchBackend::new("first"));
        let second = Arc::new(MockSearchBackend::new("second").with_results("q", three_results()));

        let chain = SearchFallbackChain::new()
            .with_backend(first.clone())
            .with_backend(second.clone());

        let results = chain.search("q", 10).await;
        assert_eq!(results, three_results());
        assert_eq!(first.calls(), vec!["q".to_string()]);
        assert_eq!(second.calls(), vec!["q".to_string()]);
    }

    #[tokio::test]
    async fn test_error_is_swallowed_and_next_backend_used() {
        let second = Arc::new(MockSearchBackend::new("second").with_results("q", three_results()));
        let chain = SearchFallbackChain::new()
            .with_backend(Arc::new(FailingBackend::new("broken")))
            .with_backend(second);

        assert_eq!(chain.search("q", 10).await.len(), 3);
    }

    #[tokio::test]
    async fn test_first_hit_stops_the_chain() {
        let first = Arc::new(MockSearchBackend::new("first").with_results("q", three_results()));
        let second = Arc::new(MockSearchBackend::new("second").with_results("q", three_results()));

        let chain = SearchFallbackChain::new()
            .with_backend(first)
            .with_backend(second.clone());

        chain.search("q", 10).await;
        assert!(second.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_chain_is_empty_not_error() {
        let chain = SearchFallbackChain::new()
            .with_backend(Arc::new(FailingBackend::new("a")))
            .with_backend(Arc::new(MockSearchBackend::new("b")))
            .with_backend(Arc::new(FailingBackend::new("c")));

        assert!(chain.search("q", 10).await.is_empty());
        assert!(SearchFallbackChain::new().search("q", 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_results_truncated_to_limit() {
        let chain = SearchFallbackChain::new()
            .with_backend(Arc::new(MockSearchBackend::new("a").with_results("q", three_results())));
        assert_eq!(chain.search("q", 2).await.len(), 2);
    }

    #[test]
    fn test_backend_names_in_priority_order() {
        let chain = SearchFallbackChain::new()
            .with_backend(Arc::new(MockSearchBackend::new("tavily")))
            .with_backend(Arc::new(FailingBackend::new("brave")));
        assert_eq!(chain.backend_names(), vec!["tavily", "brave"]);
    }
}
