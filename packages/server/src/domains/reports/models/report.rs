//! Ranked portfolio report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::projects::Project;
use crate::domains::scoring::models::{Score, HIGH_PRIORITY_THRESHOLD};

/// Scores at or above this are "medium" when not high.
pub const MEDIUM_BAND_THRESHOLD: f64 = 5.0;

/// A project with its score, if it has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProject {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl ScoredProject {
    pub fn new(project: Project, score: Option<Score>) -> Self {
        Self { project, score }
    }
}

/// Display band of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= HIGH_PRIORITY_THRESHOLD {
            ScoreBand::High
        } else if score >= MEDIUM_BAND_THRESHOLD {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// `$1.2B`, `$350M`, or `TBD` below one million.
pub fn format_amount(amount: u64) -> String {
    const BILLION: f64 = 1_000_000_000.0;
    const MILLION: f64 = 1_000_000.0;

    let amount = amount as f64;
    if amount >= BILLION {
        format!("${:.1}B", amount / BILLION)
    } else if amount >= MILLION {
        format!("${:.0}M", amount / MILLION)
    } else {
        "TBD".to_string()
    }
}

/// One report entry, 1-based rank in score order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProject {
    pub rank: usize,
    #[serde(flatten)]
    pub project: Project,
    pub score: Score,
    pub band: ScoreBand,
    pub financing_label: String,
}

/// Portfolio statistics over the scored projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub project_count: usize,
    pub high_priority_count: usize,
    pub total_financing: u64,
    pub total_financing_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: ReportStats,
    pub projects: Vec<RankedProject>,
}

/// A page of ranked entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub projects: Vec<RankedProject>,
}

impl Report {
    /// Rank the scored projects. Unscored projects are left out; equal
    /// scores keep their input order.
    pub fn aggregate(scored: Vec<ScoredProject>, generated_at: DateTime<Utc>) -> Self {
        let mut entries: Vec<(Project, Score)> = scored
            .into_iter()
            .filter_map(|sp| sp.score.map(|score| (sp.project, score)))
            .collect();

        entries.sort_by(|(_, a), (_, b)| b.overall_score.total_cmp(&a.overall_score));

        let total_financing = entries
            .iter()
            .map(|(p, _)| p.financing_amount())
            .fold(0u64, u64::saturating_add);
        let high_priority_count = entries.iter().filter(|(_, s)| s.is_high_priority()).count();

        let projects: Vec<RankedProject> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (project, score))| RankedProject {
                rank: i + 1,
                band: ScoreBand::for_score(score.overall_score),
                financing_label: format_amount(project.financing_amount()),
                project,
                score,
            })
            .collect();

        Self {
            generated_at,
            stats: ReportStats {
                project_count: projects.len(),
                high_priority_count,
                total_financing,
                total_financing_label: format_amount(total_financing),
            },
            projects,
        }
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        self.projects.len().div_ceil(page_size.max(1))
    }

    /// Entries of a 1-based page; out-of-range pages are empty.
    pub fn page(&self, page: usize, page_size: usize) -> ReportPage {
        let page = page.max(1);
        let page_size = page_size.max(1);

        let projects = self
            .projects
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect();

        ReportPage {
            page,
            page_size,
            total_pages: self.total_pages(page_size),
            projects,
        }
    }
}
