//! Score store implementations.
//!
//! - `MemoryScoreStore` - process-local map, used when no database is configured
//! - `PostgresScoreStore` - `project_scores` table, upserted by project id

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use research::ResearchBundle;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domains::scoring::models::Score;
use crate::kernel::{BaseScoreStore, StoredScore};

// =============================================================================
// In-memory store
// =============================================================================

#[derive(Default)]
pub struct MemoryScoreStore {
    scores: RwLock<HashMap<String, StoredScore>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.scores.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.scores.read().await.is_empty()
    }
}

#[async_trait]
impl BaseScoreStore for MemoryScoreStore {
    async fn put(
        &self,
        project_id: &str,
        score: &Score,
        research: Option<&ResearchBundle>,
    ) -> Result<()> {
        let stored = StoredScore {
            project_id: project_id.to_string(),
            score: score.clone(),
            research: research.cloned(),
            updated_at: Utc::now(),
        };
        self.scores.write().await.insert(project_id.to_string(), stored);
        Ok(())
    }

    async fn get(&self, project_ids: &[String]) -> Result<HashMap<String, StoredScore>> {
        let scores = self.scores.read().await;
        Ok(project_ids
            .iter()
            .filter_map(|id| scores.get(id).map(|s| (id.clone(), s.clone())))
            .collect())
    }
}

// =============================================================================
// PostgreSQL store
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ScoreRow {
    project_id: String,
    score_data: Json<Score>,
    research: Option<Json<ResearchBundle>>,
    updated_at: DateTime<Utc>,
}

impl From<ScoreRow> for StoredScore {
    fn from(row: ScoreRow) -> Self {
        Self {
            project_id: row.project_id,
            score: row.score_data.0,
            research: row.research.map(|r| r.0),
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PostgresScoreStore {
    pool: PgPool,
}

impl PostgresScoreStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseScoreStore for PostgresScoreStore {
    async fn put(
        &self,
        project_id: &str,
        score: &Score,
        research: Option<&ResearchBundle>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO project_scores (project_id, score_data, research, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (project_id) DO UPDATE
            SET score_data = EXCLUDED.score_data,
                research = EXCLUDED.research,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(project_id)
        .bind(Json(score))
        .bind(research.map(Json))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to store score for project {project_id}"))?;

        debug!(project_id = %project_id, "Stored score");
        Ok(())
    }

    async fn get(&self, project_ids: &[String]) -> Result<HashMap<String, StoredScore>> {
        if project_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ScoreRow>(
            "SELECT project_id, score_data, research, updated_at FROM project_scores WHERE project_id = ANY($1)",
        )
        .bind(project_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load stored scores")?;

        Ok(rows
            .into_iter()
            .map(|row| (row.project_id.clone(), StoredScore::from(row)))
            .collect())
    }
}
