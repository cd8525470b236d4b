//! Brave result-page scraper.
//!
//! Scrapes the public Brave Search HTML page with CSS selectors. The markup is
//! not an API and changes without notice, so every lookup is optional: a page
//! we can't understand yields zero results, never an error.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use crate::error::{BackendResult, SearchBackendError};
use crate::traits::searcher::{SearchBackend, SearchResult};

const BACKEND: &str = "brave";
const DEFAULT_ENDPOINT: &str = "https://search.brave.com/search";

// Use a browser-like User-Agent to avoid bot detection
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Result containers, most specific first.
const RESULT_SELECTORS: &[&str] = &["div.snippet[data-type='web']", "div.snippet", "div.result"];
const TITLE_SELECTORS: &[&str] = &[".title", ".snippet-title", "h2", "h3"];
const DESCRIPTION_SELECTORS: &[&str] = &[
    ".snippet-description",
    ".snippet-content",
    ".description",
    "p",
];

/// Search backend that scrapes Brave's HTML result page.
pub struct BraveHtmlBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl BraveHtmlBackend {
    /// Create a new backend sharing the given HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the backend at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

fn clean_text<'a>(raw: impl Iterator<Item = &'a str>) -> String {
    let joined = raw.collect::<Vec<_>>().join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_text(element: &ElementRef<'_>, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|s| {
        let selector = Selector::parse(s).ok()?;
        element
            .select(&selector)
            .next()
            .map(|el| clean_text(el.text()))
            .filter(|t| !t.is_empty())
    })
}

fn is_external_link(href: &str) -> bool {
    (href.starts_with("http://") || href.starts_with("https://"))
        && !href.contains("search.brave.com")
}

fn first_external_link(element: &ElementRef<'_>) -> Option<String> {
    let anchor = Selector::parse("a[href]").ok()?;
    element
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| is_external_link(href))
        .map(str::to_string)
}

/// Extract results from snippet containers.
fn parse_snippets(document: &Html, limit: usize) -> Vec<SearchResult> {
    for selector_str in RESULT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let results: Vec<SearchResult> = document
            .select(&selector)
            .filter_map(|snippet| {
                let url = first_external_link(&snippet)?;
                let title = first_text(&snippet, TITLE_SELECTORS)?;
                let description =
                    first_text(&snippet, DESCRIPTION_SELECTORS).unwrap_or_else(|| title.clone());
                Some(SearchResult::new(title, description, url))
            })
            .take(limit)
            .collect();

        if !results.is_empty() {
            return results;
        }
    }
    Vec::new()
}

/// Last resort: any external anchor whose class mentions "result".
fn parse_result_anchors(document: &Html, limit: usize) -> Vec<SearchResult> {
    let Ok(selector) = Selector::parse("a[href][class*='result']") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            if !is_external_link(href) {
                return None;
            }
            let text = clean_text(a.text());
            if text.is_empty() {
                return None;
            }
            Some(SearchResult::new(text.clone(), text, href))
        })
        .take(limit)
        .collect()
}

/// Parse a Brave result page. Unknown markup yields an empty vector.
pub fn parse_results_page(html: &str, limit: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let results = parse_snippets(&document, limit);
    if !results.is_empty() {
        return results;
    }
    parse_result_anchors(&document, limit)
}

#[async_trait]
impl SearchBackend for BraveHtmlBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .query(&[("q", query), ("source", "web")])
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

        let html = response
            .text()
            .await
            .map_err(|e| SearchBackendError::http(BACKEND, e))?;

        Ok(parse_results_page(&html, limit))
    }
}
