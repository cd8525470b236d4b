//! Keyword-driven demo scorer.
//!
//! Produces a structurally complete [`Score`] from the project name alone,
//! with no network calls. Scores are random within a band chosen by keyword
//! hits, so the output looks plausible but is not an assessment.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use super::models::{
    primary_dimension, weighted_overall, Approach, CollectiveIntelligence, Dimension,
    EmergingTech, Foresight, Level, Opportunity, Relevance, Score,
};
use crate::domains::projects::Project;

const TECH_KEYWORDS: &[&str] = &[
    "digital",
    "technolog",
    "data",
    "innovation",
    "smart",
    "connectivity",
    "broadband",
    "e-government",
    "online",
    "platform",
    "mobile",
];

const FORESIGHT_KEYWORDS: &[&str] = &[
    "climate",
    "resilien",
    "sustainab",
    "renewable",
    "energy",
    "green",
    "adaptation",
    "future",
    "transition",
    "disaster",
    "environment",
];

const COLLECTIVE_KEYWORDS: &[&str] = &[
    "community",
    "participat",
    "inclusion",
    "inclusive",
    "local",
    "youth",
    "women",
    "entrepreneur",
    "small business",
    "msme",
    "cooperative",
    "social",
    "partnership",
];

type PhraseRules = &'static [(&'static str, &'static [&'static str])];

const TECHNOLOGY_RULES: PhraseRules = &[
    ("digital", &["Digital public infrastructure", "Cloud-based service platforms"]),
    ("data", &["Data analytics dashboards"]),
    ("energy", &["Smart grid and IoT metering"]),
    ("agricultur", &["Precision agriculture sensors", "Satellite crop monitoring"]),
    ("health", &["Telemedicine platforms", "AI-assisted diagnostics"]),
    ("water", &["IoT water quality sensors"]),
    ("transport", &["Intelligent transport systems"]),
    ("education", &["Adaptive learning platforms"]),
    ("financ", &["Mobile money and digital payments"]),
    ("urban", &["Digital twins for urban planning"]),
    ("climate", &["Remote sensing for climate risk"]),
];
const TECHNOLOGY_FALLBACK: &str = "Digital monitoring and reporting tools";

const DISRUPTION_RULES: PhraseRules = &[
    ("climate", &["Increasing climate volatility", "Carbon pricing pressure"]),
    ("energy", &["Decentralised renewable generation"]),
    ("agricultur", &["Shifting growing seasons"]),
    ("urban", &["Rapid urbanisation"]),
    ("digital", &["Automation of public service delivery"]),
    ("health", &["Demographic and epidemiological transition"]),
    ("water", &["Rising water scarcity"]),
    ("financ", &["Growth of digital financial services"]),
    ("education", &["Changing skills demand"]),
];
const DISRUPTION_FALLBACK: &str = "Accelerating digital transformation of the sector";

const ECOSYSTEM_RULES: PhraseRules = &[
    ("youth", &["Youth innovation challenges"]),
    ("women", &["Women entrepreneur networks"]),
    ("community", &["Community-led monitoring initiatives"]),
    ("agricultur", &["Farmer cooperatives and agri-tech hubs"]),
    ("digital", &["Local tech hubs and hackathons"]),
    ("entrepreneur", &["Startup accelerator programmes"]),
    ("health", &["Health innovation challenges"]),
    ("social", &["Social enterprise networks"]),
];
const ECOSYSTEM_FALLBACK: &str = "National innovation ecosystem actors";

const HEURISTIC_EVIDENCE: &str =
    "Heuristic estimate from project metadata; no web research was performed.";

/// Demo scorer. Deterministic per project when built with a seed.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    seed: Option<u64>,
}

impl HeuristicScorer {
    /// Scorer drawing from OS entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer whose draws depend only on `seed` and the project id.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng_for(&self, project_id: &str) -> StdRng {
        match self.seed {
            Some(seed) => {
                let digest = Sha256::digest(project_id.as_bytes());
                let mut prefix = [0u8; 8];
                prefix.copy_from_slice(&digest[..8]);
                StdRng::seed_from_u64(seed ^ u64::from_le_bytes(prefix))
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Score a project. Never fails.
    pub fn score(&self, project: &Project) -> Score {
        let mut rng = self.rng_for(&project.id);
        let name = project.project_name.to_lowercase();
        let domain = project.domain();
        let country = match project.primary_country() {
            "" => "the country",
            c => c,
        };

        let tech = band_score(&mut rng, &name, TECH_KEYWORDS);
        let foresight = band_score(&mut rng, &name, FORESIGHT_KEYWORDS);
        let collective = band_score(&mut rng, &name, COLLECTIVE_KEYWORDS);
        let primary = primary_dimension(tech, foresight, collective);

        let technologies = phrases(&name, TECHNOLOGY_RULES, TECHNOLOGY_FALLBACK);
        let disruptions = phrases(&name, DISRUPTION_RULES, DISRUPTION_FALLBACK);
        let examples = phrases(&name, ECOSYSTEM_RULES, ECOSYSTEM_FALLBACK);

        let applications: Vec<String> = technologies
            .iter()
            .take(2)
            .map(|t| format!("{t} to strengthen {domain} delivery in {country}"))
            .collect();

        let top_opportunities = vec![
            Opportunity {
                opportunity: format!("Pilot {} within {}", technologies[0].to_lowercase(), project.project_name),
                dimension: Dimension::EmergingTech,
                approach: Approach::ProofOfValue,
                rationale: Some(format!("Tests technology fit for {domain} before scale-up")),
                potential_partners: Vec::new(),
            },
            Opportunity {
                opportunity: format!(
                    "Explore {} scenarios for {domain} in {country}",
                    disruptions[0].to_lowercase()
                ),
                dimension: Dimension::Foresight,
                approach: Approach::ForesightWorkshop,
                rationale: Some("Stress-tests project design against plausible futures".to_string()),
                potential_partners: Vec::new(),
            },
        ];

        let relevance = ((tech + foresight + collective) / 3.0).round();

        Score {
            emerging_tech: EmergingTech {
                score: tech,
                technologies,
                applications,
                key_players: vec![
                    "National ICT agency".to_string(),
                    "Local technology startups".to_string(),
                ],
                evidence: HEURISTIC_EVIDENCE.to_string(),
            },
            foresight: Foresight {
                score: foresight,
                disruptions,
                strategic_risks: vec![
                    "Technology lock-in".to_string(),
                    "Implementation capacity gaps".to_string(),
                ],
                horizon: if foresight >= 7.0 { "medium-term" } else { "long-term" }.to_string(),
                evidence: HEURISTIC_EVIDENCE.to_string(),
            },
            collective_intelligence: CollectiveIntelligence {
                score: collective,
                ecosystem_activity: activity_label(collective).to_string(),
                examples,
                stakeholders: vec![
                    "Line ministry counterparts".to_string(),
                    "Local universities".to_string(),
                    "Civil society organisations".to_string(),
                ],
                evidence: HEURISTIC_EVIDENCE.to_string(),
            },
            relevance: Relevance {
                score: relevance,
                rationale: format!("Innovation priorities in {domain} are relevant to {country}."),
                country_context: None,
            },
            overall_score: weighted_overall(tech, foresight, collective),
            primary_dimension: primary,
            top_opportunities,
            key_insight: format!(
                "{country}'s {domain} project shows its strongest innovation potential in {}.",
                primary.label().to_lowercase()
            ),
            confidence_level: Some(Level::Low),
            research_quality: Some(Level::Low),
        }
    }
}

/// Uniform integer in [7, 9] on a keyword hit, else in [4, 6].
fn band_score(rng: &mut StdRng, name: &str, keywords: &[&str]) -> f64 {
    let hit = keywords.iter().any(|k| name.contains(k));
    let value: u8 = if hit { rng.gen_range(7..=9) } else { rng.gen_range(4..=6) };
    f64::from(value)
}

/// Every phrase whose rule matches, or the fallback alone.
fn phrases(name: &str, rules: PhraseRules, fallback: &str) -> Vec<String> {
    let matched: Vec<String> = rules
        .iter()
        .filter(|(needle, _)| name.contains(*needle))
        .flat_map(|(_, phrases)| phrases.iter().map(|p| p.to_string()))
        .collect();

    if matched.is_empty() {
        vec![fallback.to_string()]
    } else {
        matched
    }
}

fn activity_label(score: f64) -> &'static str {
    if score >= 7.0 {
        "high"
    } else if score >= 5.0 {
        "medium"
    } else {
        "low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn project(id: &str, name: &str) -> Project {
        serde_json::from_value(json!({
            "id": id,
            "project_name": name,
            "countryname": "Bangladesh",
            "totalamt": "100,000,000"
        }))
        .unwrap()
    }

    fn in_band(score: f64, hit: bool) -> bool {
        if hit {
            (7.0..=9.0).contains(&score)
        } else {
            (4.0..=6.0).contains(&score)
        }
    }

    #[test]
    fn test_keyword_sets_are_disjoint() {
        for k in TECH_KEYWORDS {
            assert!(!FORESIGHT_KEYWORDS.contains(k));
            assert!(!COLLECTIVE_KEYWORDS.contains(k));
        }
        for k in FORESIGHT_KEYWORDS {
            assert!(!COLLECTIVE_KEYWORDS.contains(k));
        }
    }

    #[test]
    fn test_keyword_hits_raise_band() {
        let score = HeuristicScorer::new().score(&project("P1", "Digital Climate Resilience for Youth"));
        assert!(in_band(score.emerging_tech.score, true));
        assert!(in_band(score.foresight.score, true));
        assert!(in_band(score.collective_intelligence.score, true));

        let score = HeuristicScorer::new().score(&project("P2", "Road Rehabilitation"));
        assert!(in_band(score.emerging_tech.score, false));
        assert!(in_band(score.foresight.score, false));
        assert!(in_band(score.collective_intelligence.score, false));
        assert_eq!(score.emerging_tech.technologies, vec![TECHNOLOGY_FALLBACK]);
    }

    #[test]
    fn test_matched_rules_append_phrases() {
        let score = HeuristicScorer::new().score(&project("P3", "Health and Digital Services"));
        assert_eq!(
            score.emerging_tech.technologies,
            vec![
                "Digital public infrastructure",
                "Cloud-based service platforms",
                "Telemedicine platforms",
                "AI-assisted diagnostics",
            ]
        );
    }

    #[test]
    fn test_seeded_scores_are_reproducible_per_project() {
        let scorer = HeuristicScorer::seeded(42);
        let a = project("P100", "Green Energy Transition");
        assert_eq!(scorer.score(&a), scorer.score(&a));
    }

    #[test]
    fn test_shape() {
        let score = HeuristicScorer::seeded(7).score(&project("P4", "Water Supply"));

        assert_eq!(score.top_opportunities.len(), 2);
        assert_eq!(score.top_opportunities[0].approach, Approach::ProofOfValue);
        assert_eq!(score.top_opportunities[0].dimension, Dimension::EmergingTech);
        assert_eq!(score.top_opportunities[1].approach, Approach::ForesightWorkshop);
        assert_eq!(score.top_opportunities[1].dimension, Dimension::Foresight);

        let (t, f, c) = score.dimension_scores();
        assert_eq!(score.overall_score, weighted_overall(t, f, c));
        assert_eq!(score.primary_dimension, primary_dimension(t, f, c));
        assert_eq!(score.relevance.score, ((t + f + c) / 3.0).round());
        assert!(score.key_insight.contains("Bangladesh"));
        assert!(score.key_insight.contains("water"));
        assert!(score.key_insight.contains(&score.primary_dimension.label().to_lowercase()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn prop_heuristic_is_total(name in "\\PC{0,80}", id in "[A-Z0-9]{1,10}") {
            let score = HeuristicScorer::new().score(&project(&id, &name));

            for s in [score.emerging_tech.score, score.foresight.score, score.collective_intelligence.score] {
                prop_assert!((4.0..=9.0).contains(&s));
            }
            prop_assert!((0.0..=10.0).contains(&score.overall_score));
            prop_assert!((1.0..=10.0).contains(&score.relevance.score));
            prop_assert!(!score.emerging_tech.technologies.is_empty());
            prop_assert!(!score.foresight.disruptions.is_empty());
            prop_assert!(!score.collective_intelligence.examples.is_empty());
            prop_assert_eq!(score.top_opportunities.len(), 2);
        }
    }
}
