//! Rate-limited backend wrapper.
//!
//! Wraps any SearchBackend with a governor quota. Facet queries within one
//! project are already paced by the aggregator; this keeps the per-provider
//! rate bounded when several projects are researched at once.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::BackendResult;
use crate::traits::searcher::{SearchBackend, SearchResult};

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A backend wrapper that enforces a request quota.
pub struct RateLimitedBackend<B: SearchBackend> {
    inner: B,
    limiter: Arc<DefaultRateLimiter>,
}

impl<B: SearchBackend> RateLimitedBackend<B> {
    /// Allow at most `requests_per_second` queries per second.
    pub fn new(backend: B, requests_per_second: NonZeroU32) -> Self {
        Self::with_quota(backend, Quota::per_second(requests_per_second))
    }

    /// Create with a custom quota.
    pub fn with_quota(backend: B, quota: Quota) -> Self {
        Self {
            inner: backend,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<B: SearchBackend> SearchBackend for RateLimitedBackend<B> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;
        self.inner.search(query, limit).await
    }
}

/// Extension trait for easy rate limiting.
pub trait SearchBackendExt: SearchBackend + Sized {
    /// Wrap this backend with rate limiting.
    fn rate_limited(self, requests_per_second: NonZeroU32) -> RateLimitedBackend<Self> {
        RateLimitedBackend::new(self, requests_per_second)
    }
}

impl<B: SearchBackend + Sized> SearchBackendExt for B {}
