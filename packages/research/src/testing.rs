//! Testing utilities including mock backends.
//!
//! Useful for testing applications that use the research library without
//! making network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{BackendResult, SearchBackendError};
use crate::traits::searcher::{SearchBackend, SearchResult};

/// Mock search backend with canned results per query.
pub struct MockSearchBackend {
    name: &'static str,
    results: RwLock<HashMap<String, Vec<SearchResult>>>,
    fallback: RwLock<Vec<SearchResult>>,
    calls: RwLock<Vec<String>>,
}

impl MockSearchBackend {
    /// Create a mock that answers every query with no results.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            results: RwLock::new(HashMap::new()),
            fallback: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Add results for an exact query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Results returned for any query without an exact match.
    pub fn with_default_results(self, results: Vec<SearchResult>) -> Self {
        *self.fallback.write().unwrap() = results;
        self
    }

    /// Queries received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        self.calls.write().unwrap().push(query.to_string());

        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.fallback.read().unwrap().clone());
        results.truncate(limit);
        Ok(results)
    }
}

/// Backend that fails every query with a status error.
pub struct FailingBackend {
    name: &'static str,
    status: u16,
    calls: RwLock<usize>,
}

impl FailingBackend {
    /// Create a backend that always answers 503.
    pub fn new(name: &'static str) -> Self {
        Self::with_status(name, 503)
    }

    /// Create a backend that always answers with `status`.
    pub fn with_status(name: &'static str, status: u16) -> Self {
        Self {
            name,
            status,
            calls: RwLock::new(0),
        }
    }

    /// Number of queries received.
    pub fn call_count(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl SearchBackend for FailingBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, _query: &str, _limit: usize) -> BackendResult<Vec<SearchResult>> {
        *self.calls.write().unwrap() += 1;
        Err(SearchBackendError::Status {
            backend: self.name,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = MockSearchBackend::new("mock").with_results(
            "mobile money kenya",
            vec![
                SearchResult::new("A", "a", "https://a.org"),
                SearchResult::new("B", "b", "https://b.org"),
            ],
        );

        let results = backend.search("mobile money kenya", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.org");
        assert!(backend.search("other", 10).await.unwrap().is_empty());
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failing_backend_counts_calls() {
        let backend = FailingBackend::with_status("down", 500);
        assert!(backend.search("q", 1).await.is_err());
        assert!(backend.search("q", 1).await.is_err());
        assert_eq!(backend.call_count(), 2);
    }
}
