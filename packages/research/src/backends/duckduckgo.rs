//! DuckDuckGo Instant Answer backend.
//!
//! The Instant Answer API is keyless but sparse: it only returns
//! `RelatedTopics` for queries that map to known entities, so it often comes
//! back empty and the chain moves on.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{BackendResult, SearchBackendError};
use crate::traits::searcher::{SearchBackend, SearchResult};

const BACKEND: &str = "duckduckgo";
const DEFAULT_ENDPOINT: &str = "https://api.duckduckgo.com/";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; InnovationScout/1.0)";

/// Max characters of topic text used as a title.
const TITLE_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a plain topic or a named group of topics.
#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "FirstURL", default)]
    first_url: Option<String>,
    #[serde(rename = "Text", default)]
    text: Option<String>,
    #[serde(rename = "Topics", default)]
    topics: Vec<RelatedTopic>,
}

/// Search backend for the DuckDuckGo Instant Answer API.
pub struct DuckDuckGoBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoBackend {
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

fn flatten_topics(topics: Vec<RelatedTopic>, out: &mut Vec<SearchResult>, limit: usize) {
    for topic in topics {
        if out.len() >= limit {
            return;
        }
        if !topic.topics.is_empty() {
            flatten_topics(topic.topics, out, limit);
            continue;
        }
        if let (Some(url), Some(text)) = (topic.first_url, topic.text) {
            if url.is_empty() || text.is_empty() {
                continue;
            }
            let title: String = text.chars().take(TITLE_CHARS).collect();
            out.push(SearchResult::new(title, text, url));
        }
    }
}

/// Convert an Instant Answer payload into search results.
fn parse_response(body: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
    let answer: InstantAnswer =
        serde_json::from_str(body).map_err(|e| SearchBackendError::Parse {
            backend: BACKEND,
            reason: e.to_string(),
        })?;

    let mut results = Vec::new();
    flatten_topics(answer.related_topics, &mut results, limit);
    Ok(results)
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn search(&self, query: &str, limit: usize) -> BackendResult<Vec<SearchResult>> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
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
    fn test_parse_related_topics() {
        let body = r#"{
            "Abstract": "",
            "RelatedTopics": [
                {"FirstURL": "https://duckduckgo.com/Mobile_money", "Text": "Mobile money - a service for payments"},
                {"Name": "See also", "Topics": [
                    {"FirstURL": "https://duckduckgo.com/M-Pesa", "Text": "M-Pesa - Kenyan mobile money"}
                ]},
                {"FirstURL": "", "Text": "no url"}
            ]
        }"#;

        let results = parse_response(body, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://duckduckgo.com/Mobile_money");
        assert_eq!(results[1].description, "M-Pesa - Kenyan mobile money");
    }

    #[test]
    fn test_title_is_truncated() {
        let long_text = "x".repeat(250);
        let body = format!(
            r#"{{"RelatedTopics": [{{"FirstURL": "https://a.org", "Text": "{}"}}]}}"#,
            long_text
        );
        let results = parse_response(&body, 10).unwrap();
        assert_eq!(results[0].title.chars().count(), TITLE_CHARS);
        assert_eq!(results[0].description.len(), 250);
    }

    #[test]
    fn test_empty_answer_is_empty_not_error() {
        let results = parse_response(r#"{"RelatedTopics": []}"#, 10).unwrap();
        assert!(results.is_empty());
        let results = parse_response("{}", 10).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_limit_applies_across_groups() {
        let body = r#"{"RelatedTopics": [
            {"FirstURL": "https://a.org", "Text": "A"},
            {"Topics": [
                {"FirstURL": "https://b.org", "Text": "B"},
                {"FirstURL": "https://c.org", "Text": "C"}
            ]}
        ]}"#;
        assert_eq!(parse_response(body, 2).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_over_http() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "solar mini-grids".into()))
            .with_status(200)
            .with_body(r#"{"RelatedTopics": [{"FirstURL": "https://a.org", "Text": "Mini-grid pilots"}]}"#)
            .create_async()
            .await;

        let backend = DuckDuckGoBackend::new(reqwest::Client::new()).with_endpoint(server.url());
        let results = backend.search("solar mini-grids", 5).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results, vec![SearchResult::new("Mini-grid pilots", "Mini-grid pilots", "https://a.org")]);
    }

    #[tokio::test]
    async fn test_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let backend = DuckDuckGoBackend::new(reqwest::Client::new()).with_endpoint(server.url());
        let err = backend.search("q", 5).await.unwrap_err();
        assert!(matches!(err, SearchBackendError::Status { status: 429, .. }));
    }
}
