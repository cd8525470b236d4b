//! Report generation action.

use chrono::Utc;
use tracing::{info, warn};

use crate::domains::reports::briefing::{llm_briefing, templated_briefing};
use crate::domains::reports::models::{Report, ReportRequest, ReportResponse};
use crate::kernel::ServerDeps;

/// Rank the submitted projects and attach a briefing.
///
/// Never fails: a briefing that cannot be produced is left out.
pub async fn generate_report(request: ReportRequest, deps: &ServerDeps) -> ReportResponse {
    let generated_at = request.generated_date.unwrap_or_else(Utc::now);
    let paging = request.paging();
    let live = request
        .live_evaluator()
        .map(|(model, key)| (model.to_string(), key.to_string()));
    let template = request.prompt.clone();

    let report = Report::aggregate(request.projects, generated_at);
    info!(
        projects = report.stats.project_count,
        high_priority = report.stats.high_priority_count,
        "Report aggregated"
    );

    let briefing = match live {
        Some((model, credential)) if !report.projects.is_empty() => {
            match llm_briefing(
                &report,
                template.as_deref(),
                &model,
                &credential,
                deps.evaluator.as_ref(),
            )
            .await
            {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(model = %model, error = %e, "Briefing generation failed, omitting briefing");
                    None
                }
            }
        }
        _ => Some(templated_briefing(&report)),
    };

    ReportResponse::new(report, paging, briefing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::reports::models::ScoredProject;
    use crate::kernel::test_dependencies::{MockEvaluator, TestDependencies};
    use serde_json::json;

    fn scored(id: &str, overall: f64) -> ScoredProject {
        serde_json::from_value(json!({
            "id": id,
            "project_name": format!("Project {id}"),
            "countryname": "Bolivia",
            "totalamt": "10,000,000",
            "score": {
                "emerging_tech": {"score": overall},
                "foresight": {"score": overall},
                "collective_intelligence": {"score": overall},
                "relevance": {"score": overall},
                "overall_score": overall
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_demo_report_gets_templated_briefing() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.into_server_deps();
        let request = ReportRequest {
            projects: vec![scored("A", 4.2), scored("B", 8.1), scored("C", 6.0)],
            ..Default::default()
        };

        let response = generate_report(request, &deps).await;

        let scores: Vec<f64> = response.projects.iter().map(|p| p.score.overall_score).collect();
        assert_eq!(scores, vec![8.1, 6.0, 4.2]);
        assert_eq!(response.stats.high_priority_count, 1);
        assert!(response.briefing.unwrap().starts_with("EXECUTIVE SUMMARY"));
        assert_eq!(test_deps.evaluator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_briefing_failure_is_omitted() {
        let test_deps = TestDependencies::new().mock_evaluator(
            MockEvaluator::new().with_error(llm_client::LlmError::Auth("bad key".into())),
        );
        let deps = test_deps.into_server_deps();
        let request = ReportRequest {
            projects: vec![scored("A", 7.5)],
            model: Some("gpt-4o".into()),
            api_key: Some("sk-bad".into()),
            ..Default::default()
        };

        let response = generate_report(request, &deps).await;

        assert_eq!(response.projects.len(), 1);
        assert!(response.briefing.is_none());
        assert_eq!(test_deps.evaluator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_paged_response() {
        let test_deps = TestDependencies::new();
        let deps = test_deps.into_server_deps();
        let request = ReportRequest {
            projects: (0..5).map(|i| scored(&format!("P{i}"), 9.0 - i as f64)).collect(),
            page: Some(2),
            page_size: Some(2),
            ..Default::default()
        };

        let response = generate_report(request, &deps).await;

        let pagination = response.pagination.unwrap();
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(response.stats.project_count, 5);
        let ranks: Vec<usize> = response.projects.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![3, 4]);
    }
}
