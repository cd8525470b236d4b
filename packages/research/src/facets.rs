//! Research facets and their query templates.
//!
//! A facet is one topical angle of research, queried independently. The
//! order of [`Facet::ALL`] is the order facets appear in a bundle and in the
//! evaluator prompt.

use serde::{Deserialize, Serialize};

/// Tokens interpolated into facet queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    /// Sector name, or the domain when the project has no sector
    pub sector_name: String,
    pub domain: String,
    pub country: String,
    /// Up to three distinctive words from the project name
    pub keywords: String,
}

impl QueryContext {
    /// Build the context for a subject and its derived domain.
    pub fn new(subject: &ResearchSubject, domain: &str) -> Self {
        let sector_name = subject
            .sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(domain)
            .to_string();

        Self {
            sector_name,
            domain: domain.to_string(),
            country: subject.country.clone(),
            keywords: name_keywords(&subject.name),
        }
    }
}

/// The project fields research needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchSubject {
    pub name: String,
    pub sector: Option<String>,
    /// Primary country
    pub country: String,
}

/// Lower-cased words longer than four characters, first three only.
pub fn name_keywords(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 4)
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One topical angle of research.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    EmergingTechnology,
    InnovationEcosystem,
    FutureTrends,
    CaseStudies,
    MarketAnalysis,
    TechnologyCompanies,
    WorldBankInnovation,
    ResearchPublications,
}

impl Facet {
    /// All facets in bundle order.
    pub const ALL: [Facet; 8] = [
        Facet::EmergingTechnology,
        Facet::InnovationEcosystem,
        Facet::FutureTrends,
        Facet::CaseStudies,
        Facet::MarketAnalysis,
        Facet::TechnologyCompanies,
        Facet::WorldBankInnovation,
        Facet::ResearchPublications,
    ];

    /// Bundle key and prompt header for this facet.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::EmergingTechnology => "Emerging Technology",
            Facet::InnovationEcosystem => "Innovation Ecosystem",
            Facet::FutureTrends => "Future Trends",
            Facet::CaseStudies => "Case Studies",
            Facet::MarketAnalysis => "Market Analysis",
            Facet::TechnologyCompanies => "Technology Companies",
            Facet::WorldBankInnovation => "World Bank Innovation",
            Facet::ResearchPublications => "Research Publications",
        }
    }

    /// Search query for this facet.
    pub fn query(&self, ctx: &QueryContext) -> String {
        let QueryContext {
            sector_name,
            domain,
            country,
            keywords,
        } = ctx;

        let query = match self {
            Facet::EmergingTechnology => format!(
                "\"{sector_name}\" \"{country}\" AI machine learning IoT blockchain digital innovation 2024 2025 technology adoption"
            ),
            Facet::InnovationEcosystem => format!(
                "\"{country}\" \"{domain}\" innovation ecosystem startup accelerator tech hub incubator challenge hackathon"
            ),
            Facet::FutureTrends => format!(
                "\"{sector_name}\" future trends 2030 disruption forecast \"{country}\" development digital transformation"
            ),
            Facet::CaseStudies => format!(
                "\"{domain}\" \"{country}\" {keywords} case study implementation success pilot project technology deployment"
            ),
            Facet::MarketAnalysis => format!(
                "\"{country}\" \"{sector_name}\" market analysis innovation investment funding startup companies"
            ),
            Facet::TechnologyCompanies => format!(
                "\"{domain}\" technology companies \"{country}\" vendors solutions providers platforms startups"
            ),
            Facet::WorldBankInnovation => format!(
                "\"World Bank\" \"{country}\" \"{domain}\" innovation technology digital development project"
            ),
            Facet::ResearchPublications => format!(
                "\"{sector_name}\" \"{country}\" research report whitepaper study analysis innovation technology 2023 2024"
            ),
        };

        // Empty tokens leave double spaces behind
        query.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> ResearchSubject {
        ResearchSubject {
            name: "Kenya Digital Economy Acceleration Project".to_string(),
            sector: Some("ICT Services".to_string()),
            country: "Kenya".to_string(),
        }
    }

    #[test]
    fn test_name_keywords() {
        assert_eq!(
            name_keywords("Kenya Digital Economy Acceleration Project"),
            "kenya digital economy"
        );
        assert_eq!(name_keywords("A B of the"), "");
    }

    #[test]
    fn test_query_context_falls_back_to_domain() {
        let mut s = subject();
        s.sector = None;
        let ctx = QueryContext::new(&s, "digital economy");
        assert_eq!(ctx.sector_name, "digital economy");

        s.sector = Some("  ".to_string());
        assert_eq!(QueryContext::new(&s, "energy").sector_name, "energy");
    }

    #[test]
    fn test_queries_interpolate_tokens() {
        let ctx = QueryContext::new(&subject(), "digital economy");

        let tech = Facet::EmergingTechnology.query(&ctx);
        assert!(tech.starts_with("\"ICT Services\" \"Kenya\" AI machine learning"));

        let cases = Facet::CaseStudies.query(&ctx);
        assert!(cases.contains("\"digital economy\" \"Kenya\" kenya digital economy case study"));

        let wb = Facet::WorldBankInnovation.query(&ctx);
        assert!(wb.starts_with("\"World Bank\" \"Kenya\" \"digital economy\""));
    }

    #[test]
    fn test_empty_keywords_leave_no_double_space() {
        let ctx = QueryContext {
            sector_name: "energy".into(),
            domain: "energy".into(),
            country: "Peru".into(),
            keywords: String::new(),
        };
        assert!(!Facet::CaseStudies.query(&ctx).contains("  "));
    }

    #[test]
    fn test_labels_are_unique() {
        let labels: std::collections::HashSet<_> = Facet::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels.len(), Facet::ALL.len());
    }
}
