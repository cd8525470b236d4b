//! Web Research Library
//!
//! Gathers evidence about a development project from public web search so an
//! evaluator can ground its scores in something other than its own priors.
//!
//! # Design
//!
//! - Every provider sits behind the [`SearchBackend`] trait
//! - Providers are combined into a [`SearchFallbackChain`]: first non-empty wins
//! - Research never fails: exhausted chains produce empty result sets
//! - Facet queries run one at a time with a pause between them
//!
//! # Usage
//!
//! ```rust,ignore
//! use research::{backends::*, ResearchAggregator, ResearchSubject, SearchFallbackChain};
//! use std::sync::Arc;
//!
//! let http = reqwest::Client::new();
//! let chain = SearchFallbackChain::new()
//!     .with_backend(Arc::new(DuckDuckGoBackend::new(http.clone())))
//!     .with_backend(Arc::new(BraveHtmlBackend::new(http)));
//!
//! let subject = ResearchSubject {
//!     name: "Kenya Digital Economy Acceleration Project".into(),
//!     sector: Some("ICT Services".into()),
//!     country: "Kenya".into(),
//! };
//! let domain = research::classify_domain(&subject.name, subject.sector.as_deref());
//! let bundle = ResearchAggregator::new(chain).research(&subject, &domain).await;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (SearchBackend)
//! - [`backends`] - Provider implementations (Tavily, DuckDuckGo, Brave)
//! - [`chain`] - Ordered fallback over backends
//! - [`facets`] - Facet catalogue and query templates
//! - [`aggregator`] - Per-project facet research
//! - [`domain`] - Keyword domain classification
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod aggregator;
pub mod backends;
pub mod chain;
pub mod domain;
pub mod error;
pub mod facets;
pub mod security;
pub mod testing;
pub mod traits;

// Re-export core types at crate root
pub use aggregator::{
    ResearchAggregator, ResearchBundle, DEFAULT_QUERY_DELAY, DEFAULT_RESULTS_PER_FACET,
};
pub use chain::{BackendOutcome, SearchFallbackChain};
pub use domain::{classify_domain, DEFAULT_DOMAIN};
pub use error::{BackendResult, SearchBackendError};
pub use facets::{Facet, QueryContext, ResearchSubject};
pub use security::SecretString;
pub use traits::searcher::{SearchBackend, SearchResult};
