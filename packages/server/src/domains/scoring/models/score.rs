//! Innovation score record.
//!
//! Deserialization is lenient about qualitative fields so evaluator output
//! with missing lists or odd casing still loads; the numeric invariants are
//! restored by [`Score::recompute`].

use serde::{Deserialize, Deserializer, Serialize};

/// Weight of the emerging technology dimension in the overall score.
pub const EMERGING_TECH_WEIGHT: f64 = 0.35;
/// Weight of the foresight dimension in the overall score.
pub const FORESIGHT_WEIGHT: f64 = 0.35;
/// Weight of the collective intelligence dimension in the overall score.
pub const COLLECTIVE_WEIGHT: f64 = 0.30;

/// Scores at or above this mark a project as high priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 7.0;

pub const MIN_DIMENSION_SCORE: f64 = 1.0;
pub const MAX_DIMENSION_SCORE: f64 = 10.0;

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Weighted overall score, clamped to [0, 10] and rounded to one decimal.
pub fn weighted_overall(tech: f64, foresight: f64, collective: f64) -> f64 {
    let raw = EMERGING_TECH_WEIGHT * tech + FORESIGHT_WEIGHT * foresight + COLLECTIVE_WEIGHT * collective;
    round1(raw.clamp(0.0, 10.0))
}

/// Strongest dimension; ties resolve tech, then foresight, then collective.
pub fn primary_dimension(tech: f64, foresight: f64, collective: f64) -> Dimension {
    if tech >= foresight && tech >= collective {
        Dimension::EmergingTech
    } else if foresight >= collective {
        Dimension::Foresight
    } else {
        Dimension::CollectiveIntelligence
    }
}

pub fn clamp_dimension(score: f64) -> f64 {
    score.clamp(MIN_DIMENSION_SCORE, MAX_DIMENSION_SCORE)
}

// =============================================================================
// Enumerations
// =============================================================================

/// One of the three innovation dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Dimension {
    #[default]
    #[serde(rename = "emerging_tech")]
    EmergingTech,
    #[serde(rename = "foresight")]
    Foresight,
    #[serde(rename = "collective_intel")]
    CollectiveIntelligence,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::EmergingTech => "Emerging Technology",
            Dimension::Foresight => "Strategic Foresight",
            Dimension::CollectiveIntelligence => "Collective Intelligence",
        }
    }
}

impl From<String> for Dimension {
    /// Unrecognized tags fall back to emerging tech.
    fn from(raw: String) -> Self {
        let raw = raw.to_lowercase();
        if raw.contains("foresight") {
            Dimension::Foresight
        } else if raw.contains("collective") {
            Dimension::CollectiveIntelligence
        } else {
            Dimension::EmergingTech
        }
    }
}

/// Lab engagement approach for an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Approach {
    #[serde(rename = "Proof of Value")]
    ProofOfValue,
    #[serde(rename = "Foresight Workshop")]
    ForesightWorkshop,
    #[serde(rename = "Innovation Challenge")]
    InnovationChallenge,
    #[serde(rename = "Hackathon")]
    Hackathon,
    #[serde(rename = "Scoping Study")]
    ScopingStudy,
}

impl Approach {
    pub fn label(&self) -> &'static str {
        match self {
            Approach::ProofOfValue => "Proof of Value",
            Approach::ForesightWorkshop => "Foresight Workshop",
            Approach::InnovationChallenge => "Innovation Challenge",
            Approach::Hackathon => "Hackathon",
            Approach::ScopingStudy => "Scoping Study",
        }
    }
}

impl From<String> for Approach {
    /// Unrecognized labels fall back to a scoping study.
    fn from(raw: String) -> Self {
        let raw = raw.to_lowercase();
        if raw.contains("proof") || raw.contains("pilot") {
            Approach::ProofOfValue
        } else if raw.contains("foresight") || raw.contains("workshop") {
            Approach::ForesightWorkshop
        } else if raw.contains("challenge") {
            Approach::InnovationChallenge
        } else if raw.contains("hackathon") {
            Approach::Hackathon
        } else {
            Approach::ScopingStudy
        }
    }
}

/// Qualitative high/medium/low rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Level {
    High,
    Medium,
    Low,
}

impl From<String> for Level {
    /// Unrecognized ratings read as medium.
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => Level::High,
            "low" => Level::Low,
            _ => Level::Medium,
        }
    }
}

// =============================================================================
// Score record
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergingTech {
    pub score: f64,
    #[serde(default, deserialize_with = "string_list")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub applications: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub key_players: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Foresight {
    pub score: f64,
    #[serde(default, deserialize_with = "string_list")]
    pub disruptions: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub strategic_risks: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub horizon: String,
    #[serde(default, deserialize_with = "text")]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectiveIntelligence {
    pub score: f64,
    #[serde(default, deserialize_with = "text")]
    pub ecosystem_activity: String,
    #[serde(default, deserialize_with = "string_list")]
    pub examples: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub stakeholders: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub evidence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relevance {
    pub score: f64,
    #[serde(default, deserialize_with = "text")]
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(default, deserialize_with = "text")]
    pub opportunity: String,
    #[serde(default, deserialize_with = "tag")]
    pub dimension: Dimension,
    #[serde(default = "default_approach", deserialize_with = "tag")]
    pub approach: Approach,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "string_list", skip_serializing_if = "Vec::is_empty")]
    pub potential_partners: Vec<String>,
}

fn default_approach() -> Approach {
    Approach::ScopingStudy
}

/// Structured innovation assessment for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub emerging_tech: EmergingTech,
    pub foresight: Foresight,
    pub collective_intelligence: CollectiveIntelligence,
    pub relevance: Relevance,
    #[serde(default, deserialize_with = "number")]
    pub overall_score: f64,
    #[serde(default, deserialize_with = "tag")]
    pub primary_dimension: Dimension,
    #[serde(default)]
    pub top_opportunities: Vec<Opportunity>,
    #[serde(default, deserialize_with = "text")]
    pub key_insight: String,
    #[serde(default, deserialize_with = "optional_tag", skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<Level>,
    #[serde(default, deserialize_with = "optional_tag", skip_serializing_if = "Option::is_none")]
    pub research_quality: Option<Level>,
}

impl Score {
    /// Clamp dimension scores and derive `overall_score` and
    /// `primary_dimension` from them.
    pub fn recompute(&mut self) {
        self.emerging_tech.score = clamp_dimension(self.emerging_tech.score);
        self.foresight.score = clamp_dimension(self.foresight.score);
        self.collective_intelligence.score = clamp_dimension(self.collective_intelligence.score);
        self.relevance.score = clamp_dimension(self.relevance.score);

        let (t, f, c) = self.dimension_scores();
        self.overall_score = weighted_overall(t, f, c);
        self.primary_dimension = primary_dimension(t, f, c);
    }

    /// (tech, foresight, collective)
    pub fn dimension_scores(&self) -> (f64, f64, f64) {
        (
            self.emerging_tech.score,
            self.foresight.score,
            self.collective_intelligence.score,
        )
    }

    pub fn is_high_priority(&self) -> bool {
        self.overall_score >= HIGH_PRIORITY_THRESHOLD
    }
}

// =============================================================================
// Lenient field deserializers
// =============================================================================

/// Accepts a string, null, or any scalar rendered as text.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A number or numeric string; anything else reads as zero.
fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()).unwrap_or_default())
}

/// Enum tag parsed from free text; null maps through the empty string.
fn tag<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    text(deserializer).map(T::from)
}

fn optional_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let raw = text(deserializer)?;
    Ok((!raw.trim().is_empty()).then(|| T::from(raw)))
}

/// Accepts an array (non-string items rendered as text), a single string,
/// or null.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::String(s) if s.trim().is_empty() => Vec::new(),
        serde_json::Value::String(s) => vec![s],
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .collect(),
        other => vec![other.to_string()],
    })
}
