//! Research-backed scoring of a single project.

use research::ResearchBundle;
use tracing::{debug, info};

use crate::domains::projects::Project;
use crate::domains::scoring::error::ScoringError;
use crate::domains::scoring::extractor::extract_score;
use crate::domains::scoring::models::Score;
use crate::kernel::ServerDeps;

/// Research, compose, evaluate and extract.
///
/// The research bundle is returned alongside the score so callers can
/// persist and display the evidence the score was based on.
pub async fn score_project(
    project: &Project,
    template: Option<&str>,
    model: &str,
    credential: &str,
    deps: &ServerDeps,
) -> Result<(Score, ResearchBundle), ScoringError> {
    let domain = project.domain();
    info!(project_id = %project.id, domain = %domain, "Researching project");

    let bundle = deps
        .research
        .research(&project.research_subject(), &domain)
        .await;

    let prompt = deps
        .prompt_composer
        .compose(template, project, &domain, &bundle);
    debug!(
        project_id = %project.id,
        findings = bundle.total_results(),
        prompt_bytes = prompt.len(),
        "Prompt composed"
    );

    let raw = deps.evaluator.evaluate(&prompt, model, credential).await?;
    let score = extract_score(&raw)?;

    info!(
        project_id = %project.id,
        overall = score.overall_score,
        primary = score.primary_dimension.label(),
        "Project scored"
    );
    Ok((score, bundle))
}
