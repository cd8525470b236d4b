use serde::{Deserialize, Serialize};

use super::project::Project;

/// Default rows per project search page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Filters for the upstream project search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    /// Region name, or `All` for no region filter
    pub region: Option<String>,
    pub statuses: Vec<String>,
    pub keyword: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    /// 1-based page number
    pub page: u32,
    pub page_size: u32,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            region: None,
            statuses: Vec::new(),
            keyword: None,
            year_from: None,
            year_to: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProjectQuery {
    /// Pipeline projects have no approval year yet, so a pipeline-only
    /// search ignores the year range.
    pub fn is_pipeline_only(&self) -> bool {
        self.statuses.len() == 1 && self.statuses[0].eq_ignore_ascii_case("pipeline")
    }

    /// Year range to apply, when both bounds are present and applicable.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        if self.is_pipeline_only() {
            return None;
        }
        self.year_from.zip(self.year_to)
    }

    /// Combined upstream `qterm` expression, if any filter applies.
    pub fn qterm(&self) -> Option<String> {
        let mut terms = Vec::new();

        if let Some(region) = self.region.as_deref().filter(|r| !r.is_empty() && *r != "All") {
            terms.push(format!("regionname:\"{region}\""));
        }

        if !self.statuses.is_empty() {
            let statuses = self
                .statuses
                .iter()
                .map(|s| format!("projectstatusdisplay:\"{s}\""))
                .collect::<Vec<_>>()
                .join(" OR ");
            terms.push(format!("({statuses})"));
        }

        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            terms.push(keyword.to_string());
        }

        (!terms.is_empty()).then(|| terms.join(" AND "))
    }

    /// Zero-based row offset for the requested page.
    pub fn offset(&self) -> u32 {
        self.page.max(1).saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Query-string form of a project search (`?regions=&statuses=A,B&...`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSearchParams {
    pub regions: Option<String>,
    /// Comma-separated status names
    pub statuses: Option<String>,
    pub keyword: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<ProjectSearchParams> for ProjectQuery {
    fn from(params: ProjectSearchParams) -> Self {
        let statuses = params
            .statuses
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            region: params.regions.filter(|r| !r.trim().is_empty()),
            statuses,
            keyword: params.keyword,
            year_from: params.year_from,
            year_to: params.year_to,
            page: params.page.unwrap_or(1).max(1),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1),
        }
    }
}

/// One page of upstream search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPage {
    pub total: u64,
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qterm_combines_filters() {
        let query = ProjectQuery {
            region: Some("South Asia".into()),
            statuses: vec!["Active".into(), "Pipeline".into()],
            keyword: Some("solar".into()),
            ..Default::default()
        };

        assert_eq!(
            query.qterm().unwrap(),
            "regionname:\"South Asia\" AND (projectstatusdisplay:\"Active\" OR projectstatusdisplay:\"Pipeline\") AND solar"
        );
    }

    #[test]
    fn test_all_region_is_no_filter() {
        let query = ProjectQuery {
            region: Some("All".into()),
            ..Default::default()
        };
        assert_eq!(query.qterm(), None);
    }

    #[test]
    fn test_pipeline_only_drops_years() {
        let mut query = ProjectQuery {
            statuses: vec!["Pipeline".into()],
            year_from: Some(2020),
            year_to: Some(2025),
            ..Default::default()
        };
        assert_eq!(query.year_range(), None);

        query.statuses.push("Active".into());
        assert_eq!(query.year_range(), Some((2020, 2025)));

        query.year_to = None;
        assert_eq!(query.year_range(), None);
    }

    #[test]
    fn test_params_into_query() {
        let params = ProjectSearchParams {
            regions: Some("Africa East".into()),
            statuses: Some("Active, Pipeline,".into()),
            page: Some(0),
            ..Default::default()
        };

        let query = ProjectQuery::from(params);
        assert_eq!(query.region.as_deref(), Some("Africa East"));
        assert_eq!(query.statuses, vec!["Active", "Pipeline"]);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_offset() {
        let query = ProjectQuery {
            page: 3,
            page_size: 50,
            ..Default::default()
        };
        assert_eq!(query.offset(), 100);
        assert_eq!(ProjectQuery { page: 0, ..Default::default() }.offset(), 0);
    }
}
