//! Search chain assembly from configuration.

use std::num::NonZeroU32;
use std::sync::Arc;

use anyhow::{Context, Result};
use research::backends::{BraveHtmlBackend, DuckDuckGoBackend, SearchBackendExt, TavilyBackend};
use research::{ResearchAggregator, SearchBackend, SearchFallbackChain};
use tracing::info;

use crate::config::Config;

/// Sent by every search request; the scraped providers reject bare clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Tavily (when keyed), then DuckDuckGo, then Brave.
pub fn build_search_chain(config: &Config) -> Result<SearchFallbackChain> {
    let http = reqwest::Client::builder()
        .timeout(config.search_timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .context("Failed to build search HTTP client")?;

    let rps = config.search_requests_per_second;
    let mut chain = SearchFallbackChain::new();

    if let Some(key) = config.tavily_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        chain = chain.with_backend(limited(TavilyBackend::new(key, http.clone()), rps));
    }

    chain = chain
        .with_backend(limited(DuckDuckGoBackend::new(http.clone()), rps))
        .with_backend(limited(BraveHtmlBackend::new(http), rps));

    info!(backends = ?chain.backend_names(), rate_limit = ?rps, "Search chain configured");
    Ok(chain)
}

pub fn build_research_aggregator(config: &Config) -> Result<ResearchAggregator> {
    Ok(ResearchAggregator::new(build_search_chain(config)?)
        .with_results_per_facet(config.search_results_per_facet)
        .with_query_delay(config.research_query_delay))
}

fn limited<B>(backend: B, rps: Option<NonZeroU32>) -> Arc<dyn SearchBackend>
where
    B: SearchBackend + 'static,
{
    match rps {
        Some(rps) => Arc::new(backend.rate_limited(rps)),
        None => Arc::new(backend),
    }
}
