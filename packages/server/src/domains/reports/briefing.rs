//! Executive briefing text for a report.
//!
//! A live evaluator writes the briefing from the ranked entries. Without
//! one, a fixed-format briefing is assembled from the report itself.

use std::fmt::Write as _;

use crate::domains::reports::models::{RankedProject, Report};
use crate::domains::scoring::error::ScoringError;
use crate::domains::scoring::models::Dimension;
use crate::kernel::BaseEvaluator;

/// Number of entries listed in a templated briefing.
pub const TOP_OPPORTUNITIES: usize = 5;

pub const PROJECTS_JSON_PLACEHOLDER: &str = "[[projects_json]]";

/// Built-in briefing template.
pub const DEFAULT_REPORT_TEMPLATE: &str = r#"You are preparing an innovation opportunity briefing for the World Bank ITS Innovation Lab leadership.

Based on the scored projects below, create a concise executive briefing.

SCORED PROJECTS:
[[projects_json]]

Generate a briefing with:

1. EXECUTIVE SUMMARY (50 words max)
   - How many projects analyzed
   - Overall innovation landscape assessment
   - Top recommendation

2. TOP 5 OPPORTUNITIES
   For each, include:
   - Project name and country
   - Overall score and primary dimension (Foresight/Tech/Collective)
   - Key opportunity in one sentence
   - Recommended Lab engagement approach

3. THEMATIC PATTERNS
   - What technology themes appear across multiple projects?
   - What regions show highest innovation potential?
   - What foresight concerns are most pressing?

4. RECOMMENDED NEXT STEPS
   - 3 specific actions for the Lab team

Keep the briefing under 500 words. Use clear, direct language suitable for senior leadership."#;

/// Fill the briefing template with the ranked entries as JSON.
pub fn briefing_prompt(template: Option<&str>, report: &Report) -> Result<String, ScoringError> {
    let template = template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_REPORT_TEMPLATE);

    let projects_json = serde_json::to_string_pretty(&report.projects)
        .map_err(|e| ScoringError::MalformedResponse(format!("could not encode projects: {e}")))?;

    Ok(template.replace(PROJECTS_JSON_PLACEHOLDER, &projects_json))
}

/// Ask the evaluator for a briefing; the raw text is returned as is.
pub async fn llm_briefing(
    report: &Report,
    template: Option<&str>,
    model: &str,
    credential: &str,
    evaluator: &dyn BaseEvaluator,
) -> Result<String, ScoringError> {
    let prompt = briefing_prompt(template, report)?;
    let text = evaluator.evaluate(&prompt, model, credential).await?;
    Ok(text.trim().to_string())
}

/// Deterministic briefing from the report statistics.
pub fn templated_briefing(report: &Report) -> String {
    let stats = &report.stats;
    let mut out = String::new();

    let _ = writeln!(out, "EXECUTIVE SUMMARY");
    let _ = writeln!(
        out,
        "{} projects analyzed, {} high priority (overall score of 7 or more), {} total financing.",
        stats.project_count, stats.high_priority_count, stats.total_financing_label
    );

    let _ = writeln!(out, "\nTOP OPPORTUNITIES");
    if report.projects.is_empty() {
        let _ = writeln!(out, "No scored projects.");
    }
    for entry in report.projects.iter().take(TOP_OPPORTUNITIES) {
        let _ = writeln!(out, "{}", opportunity_line(entry));
    }

    let _ = writeln!(out, "\nDOMINANT DIMENSIONS");
    for (dimension, count) in dimension_counts(&report.projects) {
        let _ = writeln!(out, "- {}: {}", dimension.label(), count);
    }

    out.trim_end().to_string()
}

fn opportunity_line(entry: &RankedProject) -> String {
    let score = &entry.score;
    let opportunity = score
        .top_opportunities
        .first()
        .map(|o| format!("{} ({})", o.opportunity, o.approach.label()))
        .unwrap_or_else(|| "No opportunity identified".to_string());

    format!(
        "{}. {} ({}) - score {:.1}, {}. {}",
        entry.rank,
        entry.project.project_name,
        entry.project.countryname.display(),
        score.overall_score,
        score.primary_dimension.label(),
        opportunity
    )
}

/// Primary-dimension counts in fixed dimension order.
fn dimension_counts(projects: &[RankedProject]) -> [(Dimension, usize); 3] {
    let count = |dimension: Dimension| {
        projects
            .iter()
            .filter(|p| p.score.primary_dimension == dimension)
            .count()
    };
    [
        (Dimension::EmergingTech, count(Dimension::EmergingTech)),
        (Dimension::Foresight, count(Dimension::Foresight)),
        (
            Dimension::CollectiveIntelligence,
            count(Dimension::CollectiveIntelligence),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::projects::Project;
    use crate::domains::reports::models::ScoredProject;
    use crate::domains::scoring::models::{Approach, Opportunity, Score};
    use crate::kernel::test_dependencies::MockEvaluator;
    use chrono::Utc;
    use serde_json::json;

    fn report() -> Report {
        let entry = |id: &str, name: &str, overall: f64, dimension: Dimension| {
            let project: Project = serde_json::from_value(json!({
                "id": id,
                "project_name": name,
                "countryname": "Morocco",
                "totalamt": "450,000,000"
            }))
            .unwrap();
            let score = Score {
                overall_score: overall,
                primary_dimension: dimension,
                top_opportunities: vec![Opportunity {
                    opportunity: format!("Pilot for {name}"),
                    dimension,
                    approach: Approach::InnovationChallenge,
                    rationale: None,
                    potential_partners: vec![],
                }],
                ..Default::default()
            };
            ScoredProject::new(project, Some(score))
        };

        Report::aggregate(
            vec![
                entry("P1", "Water Security", 6.5, Dimension::Foresight),
                entry("P2", "Digital Morocco", 8.2, Dimension::EmergingTech),
            ],
            Utc::now(),
        )
    }

    #[test]
    fn test_templated_briefing() {
        let text = templated_briefing(&report());

        assert!(text.starts_with("EXECUTIVE SUMMARY\n2 projects analyzed, 1 high priority"));
        assert!(text.contains("$900M total financing"));
        assert!(text.contains(
            "1. Digital Morocco (Morocco) - score 8.2, Emerging Technology. Pilot for Digital Morocco (Innovation Challenge)"
        ));
        assert!(text.contains("- Strategic Foresight: 1"));
        assert!(text.contains("- Collective Intelligence: 0"));
    }

    #[test]
    fn test_prompt_embeds_ranked_projects() {
        let prompt = briefing_prompt(None, &report()).unwrap();
        assert!(!prompt.contains(PROJECTS_JSON_PLACEHOLDER));
        assert!(prompt.contains("\"financingLabel\": \"$450M\""));
        assert!(prompt.find("Digital Morocco").unwrap() < prompt.find("Water Security").unwrap());
    }

    #[tokio::test]
    async fn test_llm_briefing_returns_raw_text() {
        let evaluator = MockEvaluator::new().with_response("  Executive briefing text.\n");
        let text = llm_briefing(&report(), Some("Brief: [[projects_json]]"), "gpt-4o", "sk", &evaluator)
            .await
            .unwrap();

        assert_eq!(text, "Executive briefing text.");
        let calls = evaluator.calls();
        assert!(calls[0].prompt.starts_with("Brief: ["));
    }
}
