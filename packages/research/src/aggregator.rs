//! Facet-by-facet research for one project.
//!
//! Queries are strictly sequential with an awaited delay between them to
//! respect third-party rate limits. A failed or empty facet still gets its
//! key in the bundle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::chain::SearchFallbackChain;
use crate::facets::{Facet, QueryContext, ResearchSubject};
use crate::traits::searcher::SearchResult;

/// Default number of results requested per facet.
pub const DEFAULT_RESULTS_PER_FACET: usize = 10;

/// Default pause between facet queries.
pub const DEFAULT_QUERY_DELAY: Duration = Duration::from_millis(800);

/// Ordered mapping of facet label to results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResearchBundle(IndexMap<String, Vec<SearchResult>>);

impl ResearchBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the results for a facet, keeping first-insertion order.
    pub fn insert(&mut self, facet: impl Into<String>, results: Vec<SearchResult>) {
        self.0.insert(facet.into(), results);
    }

    pub fn get(&self, facet: &str) -> Option<&[SearchResult]> {
        self.0.get(facet).map(Vec::as_slice)
    }

    /// Facet labels in order.
    pub fn facets(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// (facet, results) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SearchResult])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total results across all facets.
    pub fn total_results(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Runs the fixed facet battery through a fallback chain.
#[derive(Clone)]
pub struct ResearchAggregator {
    chain: SearchFallbackChain,
    results_per_facet: usize,
    query_delay: Duration,
}

impl ResearchAggregator {
    /// Create an aggregator with default limits and pacing.
    pub fn new(chain: SearchFallbackChain) -> Self {
        Self {
            chain,
            results_per_facet: DEFAULT_RESULTS_PER_FACET,
            query_delay: DEFAULT_QUERY_DELAY,
        }
    }

    /// Set the result bound per facet.
    pub fn with_results_per_facet(mut self, limit: usize) -> Self {
        self.results_per_facet = limit;
        self
    }

    /// Set the pause between facet queries.
    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    pub fn chain(&self) -> &SearchFallbackChain {
        &self.chain
    }

    /// Research every facet for `subject`. Never fails.
    pub async fn research(&self, subject: &ResearchSubject, domain: &str) -> ResearchBundle {
        let ctx = QueryContext::new(subject, domain);
        let mut bundle = ResearchBundle::new();

        for (i, facet) in Facet::ALL.iter().enumerate() {
            if i > 0 && !self.query_delay.is_zero() {
                tokio::time::sleep(self.query_delay).await;
            }

            let query = facet.query(&ctx);
            let results = self.chain.search(&query, self.results_per_facet).await;
            info!(
                facet = facet.label(),
                count = results.len(),
                "Completed facet search"
            );
            bundle.insert(facet.label(), results);
        }

        info!(
            project = %subject.name,
            total = bundle.total_results(),
            "Research complete"
        );
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingBackend, MockSearchBackend};
    use std::sync::Arc;
    use std::time::Instant;

    fn subject() -> ResearchSubject {
        ResearchSubject {
            name: "Rural Water Supply".to_string(),
            sector: None,
            country: "Ghana".to_string(),
        }
    }

    fn labels() -> Vec<&'static str> {
        Facet::ALL.iter().map(|f| f.label()).collect()
    }

    #[tokio::test]
    async fn test_bundle_has_every_facet_even_when_backends_fail() {
        let chain = SearchFallbackChain::new()
            .with_backend(Arc::new(FailingBackend::new("a")))
            .with_backend(Arc::new(FailingBackend::new("b")));
        let aggregator = ResearchAggregator::new(chain).with_query_delay(Duration::ZERO);

        let bundle = aggregator.research(&subject(), "water").await;

        assert_eq!(bundle.facets().collect::<Vec<_>>(), labels());
        assert!(bundle.iter().all(|(_, results)| results.is_empty()));
        assert_eq!(bundle.total_results(), 0);
    }

    #[tokio::test]
    async fn test_results_stored_under_facet_in_order() {
        let ctx = QueryContext::new(&subject(), "water");
        let trend_query = Facet::FutureTrends.query(&ctx);

        let backend = Arc::new(MockSearchBackend::new("mock").with_results(
            &trend_query,
            vec![SearchResult::new("Trend", "Water 2030", "https://trend.org")],
        ));
        let aggregator = ResearchAggregator::new(SearchFallbackChain::new().with_backend(backend.clone()))
            .with_query_delay(Duration::ZERO);

        let bundle = aggregator.research(&subject(), "water").await;

        assert_eq!(bundle.get("Future Trends").unwrap().len(), 1);
        assert!(bundle.get("Emerging Technology").unwrap().is_empty());
        // One query per facet, in facet order
        let expected: Vec<String> = Facet::ALL.iter().map(|f| f.query(&ctx)).collect();
        assert_eq!(backend.calls(), expected);
    }

    #[tokio::test]
    async fn test_result_count_is_bounded() {
        let many: Vec<_> = (0..25)
            .map(|i| SearchResult::new(format!("T{i}"), "d", format!("https://{i}.org")))
            .collect();
        let backend = Arc::new(MockSearchBackend::new("mock").with_default_results(many));
        let aggregator = ResearchAggregator::new(SearchFallbackChain::new().with_backend(backend))
            .with_results_per_facet(4)
            .with_query_delay(Duration::ZERO);

        let bundle = aggregator.research(&subject(), "water").await;
        assert!(bundle.iter().all(|(_, results)| results.len() == 4));
    }

    #[tokio::test]
    async fn test_queries_are_paced() {
        let aggregator = ResearchAggregator::new(SearchFallbackChain::new())
            .with_query_delay(Duration::from_millis(20));

        let start = Instant::now();
        aggregator.research(&subject(), "water").await;

        // Seven gaps between eight facets
        assert!(start.elapsed() >= Duration::from_millis(140));
    }

    #[test]
    fn test_bundle_serializes_in_facet_order() {
        let mut bundle = ResearchBundle::new();
        bundle.insert("Zeta", vec![]);
        bundle.insert("Alpha", vec![SearchResult::new("t", "d", "u")]);

        let json = serde_json::to_string(&bundle).unwrap();
        assert!(json.find("Zeta").unwrap() < json.find("Alpha").unwrap());

        let back: ResearchBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
