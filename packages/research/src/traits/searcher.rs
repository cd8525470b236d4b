//! Search backend trait for web research.
//!
//! Every provider (structured search APIs, scraped result pages) parses its
//! own payload into the backend-agnostic [`SearchResult`] shape. Backends are
//! allowed to fail; the [`SearchFallbackChain`](crate::SearchFallbackChain)
//! decides what a failure means.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendResult;

/// A single web search hit.
///
/// Results carry no identity beyond their position; the same page may be
/// returned by several backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the page (or a prefix of the snippet when the provider has none).
    pub title: String,

    /// Snippet/description from the provider.
    pub description: String,

    /// Source URL.
    pub url: String,
}

impl SearchResult {
    /// Create a new search result.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// One external search provider.
///
/// `search` may fail (network error, non-2xx status, unparsable payload).
/// Returning `Ok(vec![])` means "the provider answered but found nothing",
/// which is not an error.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short provider name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Run one query, returning at most `limit` results.
    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>>;
}

#[async_trait]
impl<B: SearchBackend + ?Sized> SearchBackend for std::sync::Arc<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        (**self).search(query, limit).await
    }
}
