//! Search backend implementations.
//!
//! - `TavilyBackend` - Tavily structured search API (requires a key)
//! - `DuckDuckGoBackend` - DuckDuckGo Instant Answer JSON API
//! - `BraveHtmlBackend` - Scraped Brave result pages
//! - `RateLimitedBackend` - Wrapper that adds a governor quota

pub mod brave;
pub mod duckduckgo;
pub mod rate_limited;
pub mod tavily;

pub use brave::BraveHtmlBackend;
pub use duckduckgo::DuckDuckGoBackend;
pub use rate_limited::{RateLimitedBackend, SearchBackendExt};
pub use tavily::TavilyBackend;
