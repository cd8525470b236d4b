//! Coarse topical domain for a project.
//!
//! The domain only shapes search queries; it is recomputed on demand and
//! never stored.

/// Domain used when neither keywords nor a sector are available.
pub const DEFAULT_DOMAIN: &str = "development";

/// Ordered (keyword, domain) rules. The first rule whose keyword occurs in
/// the project name or sector wins, so order is significant.
pub const DOMAIN_RULES: &[(&str, &str)] = &[
    ("digital", "digital economy"),
    ("health", "healthcare"),
    ("education", "education"),
    ("transport", "transportation"),
    ("agriculture", "agriculture"),
    ("energy", "energy"),
    ("water", "water"),
    ("urban", "urban development"),
    ("financial", "financial services"),
    ("trade", "trade"),
    ("climate", "climate"),
    ("infrastructure", "infrastructure"),
    ("governance", "governance"),
    ("environment", "environment"),
];

/// Classify a project by name and optional sector.
///
/// Falls back to the lower-cased sector, then to [`DEFAULT_DOMAIN`].
pub fn classify_domain(name: &str, sector: Option<&str>) -> String {
    let name = name.to_lowercase();
    let sector = sector.map(str::trim).unwrap_or_default().to_lowercase();

    DOMAIN_RULES
        .iter()
        .find(|(keyword, _)| name.contains(keyword) || sector.contains(keyword))
        .map(|(_, domain)| domain.to_string())
        .unwrap_or_else(|| {
            if sector.is_empty() {
                DEFAULT_DOMAIN.to_string()
            } else {
                sector
            }
        })
}
