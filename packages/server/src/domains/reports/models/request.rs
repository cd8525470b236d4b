use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::{RankedProject, Report, ReportPage, ReportStats, ScoredProject};
use crate::domains::projects::DEFAULT_PAGE_SIZE;
use crate::domains::scoring::models::request::DEMO_MODEL;

/// Report generation input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub projects: Vec<ScoredProject>,
    #[serde(default)]
    pub generated_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Briefing template with a `[[projects_json]]` placeholder
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ReportRequest {
    /// Model and credential for a live briefing, if both are usable.
    pub fn live_evaluator(&self) -> Option<(&str, &str)> {
        let model = self
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty() && !m.eq_ignore_ascii_case(DEMO_MODEL))?;
        let credential = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some((model, credential))
    }

    /// Requested page window, if the caller asked for one.
    pub fn paging(&self) -> Option<(usize, usize)> {
        match (self.page, self.page_size) {
            (None, None) => None,
            (page, size) => Some((
                page.unwrap_or(1),
                size.unwrap_or(DEFAULT_PAGE_SIZE as usize),
            )),
        }
    }
}

/// Page position echoed back with a paged report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Report as returned to callers: every entry, or only the requested page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: ReportStats,
    pub projects: Vec<RankedProject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub briefing: Option<String>,
}

impl ReportResponse {
    pub fn new(report: Report, paging: Option<(usize, usize)>, briefing: Option<String>) -> Self {
        let (projects, pagination) = match paging {
            Some((page, page_size)) => {
                let ReportPage {
                    page,
                    page_size,
                    total_pages,
                    projects,
                } = report.page(page, page_size);
                (
                    projects,
                    Some(PageInfo {
                        page,
                        page_size,
                        total_pages,
                    }),
                )
            }
            None => (report.projects, None),
        };

        Self {
            generated_at: report.generated_at,
            stats: report.stats,
            projects,
            pagination,
            briefing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_evaluator_requires_model_and_key() {
        let mut request = ReportRequest {
            model: Some("gpt-4o".into()),
            api_key: Some("sk".into()),
            ..Default::default()
        };
        assert_eq!(request.live_evaluator(), Some(("gpt-4o", "sk")));

        request.model = Some("Demo".into());
        assert_eq!(request.live_evaluator(), None);

        request.model = Some("claude-3-haiku".into());
        request.api_key = Some(" ".into());
        assert_eq!(request.live_evaluator(), None);
    }

    #[test]
    fn test_paging_defaults() {
        let mut request = ReportRequest::default();
        assert_eq!(request.paging(), None);

        request.page = Some(2);
        assert_eq!(request.paging(), Some((2, 50)));
    }

    #[test]
    fn test_wire_names() {
        let request: ReportRequest = serde_json::from_str(
            r#"{"projects": [], "generatedDate": "2025-03-01T12:00:00Z", "pageSize": 10, "apiKey": "k"}"#,
        )
        .unwrap();
        assert_eq!(request.page_size, Some(10));
        assert_eq!(request.api_key.as_deref(), Some("k"));
        assert!(request.generated_date.is_some());
    }
}
