//! Innovation scoring: prompt assembly, evaluator output extraction, the
//! heuristic demo scorer, and batch orchestration.

pub mod actions;
pub mod error;
pub mod extractor;
pub mod heuristic;
pub mod models;
pub mod prompt;

pub use actions::{score_batch, score_project};
pub use error::ScoringError;
pub use extractor::extract_score;
pub use heuristic::HeuristicScorer;
pub use models::*;
pub use prompt::{PromptComposer, DEFAULT_SCORING_TEMPLATE};
