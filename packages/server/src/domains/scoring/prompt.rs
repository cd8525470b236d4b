//! Evaluator prompt assembly.
//!
//! Composition is plain string work: known `[[placeholder]]` tokens are
//! substituted, unknown ones stay as written, and the research findings are
//! prepended ahead of the template.

use llm_client::truncate_to_char_boundary;
use research::{Facet, ResearchBundle, SearchResult};

use crate::domains::projects::Project;

/// Default byte bound for a single result description.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 500;

/// Text used for a facet without results.
pub const NO_RESULTS: &str = "No specific results found in search.";

/// Built-in scoring template.
pub const DEFAULT_SCORING_TEMPLATE: &str = r#"You are an innovation strategist for the World Bank ITS Innovation Lab, scoring a project for innovation engagement potential.

The Lab creates value through three capabilities:
1. STRATEGIC FORESIGHT - Future-proofing investments, Three Horizons thinking, scenario planning, regulatory sandboxes
2. EMERGING TECHNOLOGIES - AI/ML, Blockchain/DLT, IoT/Digital Twins, Drones/UAVs, Digital Public Infrastructure
3. COLLECTIVE INTELLIGENCE - Innovation challenges, hackathons, bootcamps, startup ecosystem engagement

PROJECT TO ANALYZE:
- Name: [[project_name]]
- Country: [[country]]
- Region: [[region]]
- Sector: [[sector]]
- Amount: $[[amount]]

I conducted web research on innovation in this project's domain ([[domain]]). Analyze the search results to score innovation potential.

---
SEARCH 1: EMERGING TECHNOLOGY
Results:
[[emerging_tech_results]]

---
SEARCH 2: FUTURE TRENDS & FORESIGHT
Results:
[[foresight_results]]

---
SEARCH 3: COLLECTIVE INTELLIGENCE & ECOSYSTEM
Results:
[[collective_intel_results]]

---

Based on this research, evaluate the project's potential for Innovation Lab engagement.

RESPOND WITH VALID JSON ONLY (no markdown code blocks):
{
  "emerging_tech": {
    "score": <1-10>,
    "technologies": ["<relevant tech found>"],
    "applications": ["<how it applies to this project>"],
    "key_players": ["<companies or institutions active in this space>"],
    "evidence": "<1-2 sentence summary of findings>"
  },
  "foresight": {
    "score": <1-10>,
    "disruptions": ["<anticipated changes in this domain>"],
    "strategic_risks": ["<risks the project should plan for>"],
    "horizon": "<near-term|medium-term|long-term>",
    "evidence": "<1-2 sentence summary>"
  },
  "collective_intelligence": {
    "score": <1-10>,
    "ecosystem_activity": "<high|medium|low>",
    "examples": ["<relevant challenges, hackathons, or initiatives found>"],
    "stakeholders": ["<local actors who could be engaged>"],
    "evidence": "<1-2 sentence summary>"
  },
  "relevance": {
    "score": <1-10>,
    "rationale": "<why these innovations apply to this specific project and country>",
    "country_context": "<one sentence on the country's innovation context>"
  },
  "top_opportunities": [
    {
      "opportunity": "<specific innovation opportunity>",
      "dimension": "<foresight|emerging_tech|collective_intel>",
      "approach": "<Proof of Value|Foresight Workshop|Innovation Challenge|Hackathon|Scoping Study>",
      "rationale": "<why this opportunity>",
      "potential_partners": ["<partner>"]
    }
  ],
  "key_insight": "<one sentence strategic recommendation for Lab engagement>",
  "confidence_level": "<high|medium|low>",
  "research_quality": "<high|medium|low>"
}"#;

const RESEARCH_INSTRUCTIONS: &str = "IMPORTANT: Base your scoring EXCLUSIVELY on the web research findings above. Reference specific:
- Named technologies, companies, and initiatives found in the search results
- Concrete examples of innovation challenges, hackathons, or ecosystem activities
- Actual trends and disruptions mentioned in the sources
- Real case studies and applications
- Include source URLs where relevant

If search results are limited, acknowledge this and provide a conservative score.";

/// Builds evaluator prompts from a template, a project and its research.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    description_limit: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    /// Research section followed by the filled template.
    ///
    /// A missing or blank template selects [`DEFAULT_SCORING_TEMPLATE`].
    pub fn compose(
        &self,
        template: Option<&str>,
        project: &Project,
        domain: &str,
        bundle: &ResearchBundle,
    ) -> String {
        let template = template
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_SCORING_TEMPLATE);

        let facet_block = |facet: Facet| {
            self.format_results(bundle.get(facet.label()).unwrap_or_default())
        };

        let substitutions = [
            ("[[project_name]]", project.project_name.clone()),
            ("[[country]]", project.primary_country().to_string()),
            ("[[amount]]", project.totalamt.clone()),
            ("[[domain]]", domain.to_string()),
            ("[[sector]]", project.sector_name().unwrap_or(domain).to_string()),
            ("[[region]]", project.regionname.clone()),
            ("[[emerging_tech_results]]", facet_block(Facet::EmergingTechnology)),
            ("[[foresight_results]]", facet_block(Facet::FutureTrends)),
            ("[[collective_intel_results]]", facet_block(Facet::InnovationEcosystem)),
        ];

        let filled = substitutions
            .iter()
            .fold(template.to_string(), |acc, (token, value)| acc.replace(token, value));

        format!("{}\n\n{}", self.research_section(bundle), filled)
    }

    /// The "WEB RESEARCH FINDINGS" section for a bundle, in facet order.
    pub fn research_section(&self, bundle: &ResearchBundle) -> String {
        let context = bundle
            .iter()
            .map(|(facet, results)| {
                format!("### {facet} Search Results\n{}", self.format_results(results))
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "\n=== WEB RESEARCH FINDINGS ===\n\n\
             I conducted comprehensive web searches to inform this analysis. Below are the actual search results:\n\n\
             {context}\n\n\
             === END WEB RESEARCH ===\n\n\
             {RESEARCH_INSTRUCTIONS}\n"
        )
    }

    /// Numbered results, or [`NO_RESULTS`] when there are none.
    pub fn format_results(&self, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return NO_RESULTS.to_string();
        }

        results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{}. {}\n   {}\n   Source: {}",
                    i + 1,
                    r.title,
                    truncate_to_char_boundary(&r.description, self.description_limit),
                    r.url
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project() -> Project {
        serde_json::from_value(json!({
            "id": "P1",
            "project_name": "Rwanda Digital Acceleration",
            "countryname": "Rwanda",
            "regionname": "Eastern and Southern Africa",
            "totalamt": "200,000,000"
        }))
        .unwrap()
    }

    fn bundle() -> ResearchBundle {
        let mut bundle = ResearchBundle::new();
        for facet in Facet::ALL {
            bundle.insert(facet.label(), vec![]);
        }
        bundle.insert(
            Facet::EmergingTechnology.label(),
            vec![
                SearchResult::new("Irembo platform", "E-government portal", "https://irembo.gov.rw"),
                SearchResult::new("Zipline drones", "Medical deliveries", "https://flyzipline.com"),
            ],
        );
        bundle
    }

    #[test]
    fn test_placeholders_substituted_and_unknown_kept() {
        let composer = PromptComposer::new();
        let prompt = composer.compose(
            Some("[[project_name]] in [[country]] for $[[amount]] ([[domain]], [[sector]]) [[mystery]]"),
            &project(),
            "digital economy",
            &bundle(),
        );

        assert!(prompt.ends_with(
            "Rwanda Digital Acceleration in Rwanda for $200,000,000 (digital economy, digital economy) [[mystery]]"
        ));
    }

    #[test]
    fn test_research_section_layout() {
        let composer = PromptComposer::new();
        let prompt = composer.compose(Some("T"), &project(), "digital economy", &bundle());

        assert!(prompt.starts_with("\n=== WEB RESEARCH FINDINGS ==="));
        assert!(prompt.contains(
            "### Emerging Technology Search Results\n\
             1. Irembo platform\n   E-government portal\n   Source: https://irembo.gov.rw\n\n\
             2. Zipline drones\n   Medical deliveries\n   Source: https://flyzipline.com"
        ));
        assert!(prompt.contains("### Future Trends Search Results\nNo specific results found in search."));
        assert!(prompt.contains("provide a conservative score"));

        let first = prompt.find("### Emerging Technology").unwrap();
        let last = prompt.find("### Research Publications").unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_facet_blocks() {
        let composer = PromptComposer::new();
        let prompt = composer.compose(
            Some("A:[[emerging_tech_results]]|B:[[foresight_results]]"),
            &project(),
            "digital economy",
            &bundle(),
        );
        assert!(prompt.contains("A:1. Irembo platform"));
        assert!(prompt.contains("|B:No specific results found in search."));
    }

    #[test]
    fn test_default_template_when_blank() {
        let composer = PromptComposer::new();
        let prompt = composer.compose(Some("  "), &project(), "digital economy", &bundle());
        assert!(prompt.contains("- Name: Rwanda Digital Acceleration"));
        assert!(prompt.contains("\"collective_intelligence\""));
    }

    #[test]
    fn test_descriptions_truncated() {
        let composer = PromptComposer::new().with_description_limit(10);
        let text = composer.format_results(&[SearchResult::new("t", "é".repeat(20), "u")]);
        assert!(text.contains(&format!("   {}\n", "é".repeat(5))));
    }
}
