//! Tavily-backed search.
//!
//! Structured JSON search API; highest-quality backend when a key is
//! configured, so it sits first in the default chain.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{BackendResult, SearchBackendError};
use crate::security::SecretString;
use crate::traits::searcher::{SearchBackend, SearchResult};

const BACKEND: &str = "tavily";
const DEFAULT_ENDPOINT: &str = "https://api.tavily.com/search";

/// Tavily search request.
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
}

/// Tavily search response.
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

/// A single Tavily search result.
#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Search backend for the Tavily API.
pub struct TavilyBackend {
    api_key: SecretString,
    client: reqwest::Client,
    endpoint: String,
    search_depth: String,
}

impl TavilyBackend {
    /// Create a new Tavily backend sharing the given HTTP client.
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            search_depth: "basic".to_string(),
        }
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    /// Point the backend at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Convert a Tavily payload into search results.
fn parse_response(body: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
    let response: TavilyResponse =
        serde_json::from_str(body).map_err(|e| SearchBackendError::Parse {
            backend: BACKEND,
            reason: e.to_string(),
        })?;

    Ok(response
        .results
        .into_iter()
        .filter(|r| !r.url.is_empty())
        .take(limit)
        .map(|r| {
            let description = r.content.unwrap_or_default();
            let title = r
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| r.url.clone());
            SearchResult::new(title, description, r.url)
        })
        .collect())
}

#[async_trait]
impl SearchBackend for TavilyBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        if self.api_key.is_blank() {
            return Err(SearchBackendError::NotConfigured {
                backend: BACKEND,
                reason: "empty API key".to_string(),
            });
        }

        let request = TavilyRequest {
            query,
            search_depth: &self.search_depth,
            max_results: limit,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchBackendError::http(BACKEND, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchBackendError::Status {
                backend: BACKEND,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchBackendError::http(BACKEND, e))?;

        parse_response(&body, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "query": "x",
            "results": [
                {"url": "https://a.org", "title": "A", "content": "About A", "score": 0.9},
                {"url": "https://b.org", "title": null, "content": "About B", "score": 0.5},
                {"url": "", "title": "Broken", "content": "", "score": 0.1}
            ]
        }"#;

        let results = parse_response(body, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], SearchResult::new("A", "About A", "https://a.org"));
        assert_eq!(results[1].title, "https://b.org");
    }

    #[test]
    fn test_parse_response_respects_limit() {
        let body = r#"{"results": [
            {"url": "https://a.org"}, {"url": "https://b.org"}, {"url": "https://c.org"}
        ]}"#;
        assert_eq!(parse_response(body, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_response_rejects_garbage() {
        let err = parse_response("<html>", 5).unwrap_err();
        assert!(matches!(err, SearchBackendError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_blank_key_is_not_configured() {
        let backend = TavilyBackend::new("", reqwest::Client::new());
        let err = backend.search("query", 5).await.unwrap_err();
        assert!(matches!(err, SearchBackendError::NotConfigured { .. }));
    }
}
