//! Batch scoring with per-project failure isolation.

use futures::stream::{self, StreamExt};
use research::ResearchBundle;
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::score_project::score_project;
use crate::domains::projects::Project;
use crate::domains::scoring::error::ScoringError;
use crate::domains::scoring::models::{Score, ScoringRequest, ScoringResult};
use crate::kernel::{ServerDeps, Vendor};

/// Score every project of a request.
///
/// Configuration problems reject the whole batch before any work starts.
/// After that every project yields exactly one result, in input order,
/// whether it succeeded or not.
pub async fn score_batch(
    request: ScoringRequest,
    deps: &ServerDeps,
    cancel: &CancellationToken,
) -> Result<Vec<ScoringResult>, ScoringError> {
    let demo = request.is_demo();
    if !demo {
        validate_model(&request.model)?;
    }

    let batch_id = Uuid::now_v7();
    let span = info_span!(
        "score_batch",
        %batch_id,
        projects = request.projects.len(),
        demo,
        model = %request.model
    );

    async move {
        let credential = request.credential().unwrap_or_default().to_string();
        let mode = if demo { Mode::Heuristic } else { Mode::Evaluator };
        let ScoringRequest {
            projects,
            prompt,
            model,
            ..
        } = request;
        let (template, model, credential) = (prompt.as_deref(), model.as_str(), credential.as_str());

        let results: Vec<ScoringResult> = stream::iter(projects)
            .map(move |project| async move {
                score_one(&project, mode, template, model, credential, deps, cancel).await
            })
            .buffered(deps.scoring_concurrency.max(1))
            .boxed()
            .collect()
            .await;

        let succeeded = results.iter().filter(|r| r.success).count();
        info!(
            succeeded,
            failed = results.len() - succeeded,
            "Batch scoring complete"
        );
        Ok(results)
    }
    .instrument(span)
    .await
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Heuristic,
    Evaluator,
}

fn validate_model(model: &str) -> Result<(), ScoringError> {
    if model.trim().is_empty() {
        return Err(ScoringError::Config("a model is required".to_string()));
    }
    if Vendor::for_model(model).is_none() {
        return Err(ScoringError::Config(format!("unsupported model: {model}")));
    }
    Ok(())
}

async fn score_one(
    project: &Project,
    mode: Mode,
    template: Option<&str>,
    model: &str,
    credential: &str,
    deps: &ServerDeps,
    cancel: &CancellationToken,
) -> ScoringResult {
    if cancel.is_cancelled() {
        warn!(project_id = %project.id, "Skipping project, batch cancelled");
        return ScoringResult::failed(&project.id, &ScoringError::Cancelled);
    }

    match mode {
        Mode::Heuristic => {
            let score = deps.heuristic.score(project);
            persist(deps, &project.id, &score, None).await;
            ScoringResult::scored(&project.id, score, None)
        }
        Mode::Evaluator => match score_project(project, template, model, credential, deps).await {
            Ok((score, bundle)) => {
                persist(deps, &project.id, &score, Some(&bundle)).await;
                ScoringResult::scored(&project.id, score, Some(bundle))
            }
            Err(e) => {
                warn!(project_id = %project.id, error = %e, "Project scoring failed");
                ScoringResult::failed(&project.id, &e)
            }
        },
    }
}

/// Store failures are logged, never surfaced.
async fn persist(deps: &ServerDeps, project_id: &str, score: &Score, research: Option<&ResearchBundle>) {
    if let Err(e) = deps.score_store.put(project_id, score, research).await {
        warn!(project_id = %project_id, error = %e, "Failed to persist score");
    }
}
