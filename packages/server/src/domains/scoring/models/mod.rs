pub mod request;
pub mod score;

pub use request::{ScoringRequest, ScoringResult};
pub use score::{
    primary_dimension, round1, weighted_overall, Approach, CollectiveIntelligence, Dimension,
    EmergingTech, Foresight, Level, Opportunity, Relevance, Score, HIGH_PRIORITY_THRESHOLD,
};
