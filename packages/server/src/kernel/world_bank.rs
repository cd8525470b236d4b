//! World Bank project search adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domains::projects::{Project, ProjectPage, ProjectQuery};
use crate::kernel::BaseProjectSource;

pub const WORLD_BANK_API_URL: &str = "https://search.worldbank.org/api/v2/projects";

/// Fields requested from the search API.
const FIELD_LIST: &str = "id,project_name,countryname,countryshortname,regionname,status,projectstatusdisplay,totalamt,sector1,mjsector1Name,theme1,mjtheme_namecode,boardapprovaldate,approvalfy,url";

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default, deserialize_with = "lenient_total")]
    total: u64,
    /// Keyed by project id, in ranking order
    #[serde(default)]
    projects: IndexMap<String, Value>,
}

/// `total` arrives as `"1234"` or `1234`.
fn lenient_total<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Clone)]
pub struct WorldBankClient {
    http: reqwest::Client,
    base_url: String,
}

impl WorldBankClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: WORLD_BANK_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Query parameters for a search, in the order they are sent.
    pub fn query_params(query: &ProjectQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("fl", FIELD_LIST.to_string()),
        ];

        if let Some(qterm) = query.qterm() {
            params.push(("qterm", qterm));
        }
        if let Some((from, to)) = query.year_range() {
            params.push(("appr_yr", format!("{from}:{to}")));
        }

        params.push(("rows", query.page_size.to_string()));
        params.push(("os", query.offset().to_string()));
        params.push(("srt", "boardapprovaldate desc".to_string()));
        params
    }
}

#[async_trait]
impl BaseProjectSource for WorldBankClient {
    async fn search(&self, query: &ProjectQuery) -> Result<ProjectPage> {
        let params = Self::query_params(query);
        debug!(?params, "Searching World Bank projects");

        let response = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .context("World Bank project search request failed")?
            .error_for_status()
            .context("World Bank project search returned an error status")?;

        let body: SearchResponse = response
            .json()
            .await
            .context("Failed to parse World Bank project search response")?;

        let page = into_page(body);
        info!(total = page.total, returned = page.projects.len(), "World Bank search complete");
        Ok(page)
    }
}

/// Entries that do not carry the minimum project shape are skipped.
fn into_page(body: SearchResponse) -> ProjectPage {
    let projects = body
        .projects
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<Project>(value) {
            Ok(project) => Some(project),
            Err(e) => {
                warn!(project_key = %key, error = %e, "Skipping malformed project entry");
                None
            }
        })
        .collect();

    ProjectPage {
        total: body.total,
        projects,
    }
}
