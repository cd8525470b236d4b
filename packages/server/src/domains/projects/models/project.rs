use research::{classify_domain, ResearchSubject};
use serde::{Deserialize, Deserializer, Serialize};

/// A financed development project as served by the upstream project search.
///
/// Field names follow the upstream wire format so projects round-trip
/// between the project search, scoring, and report endpoints untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub project_name: String,
    #[serde(default)]
    pub countryname: CountryNames,
    #[serde(default)]
    pub regionname: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projectstatusdisplay: Option<String>,
    /// Locale-formatted amount such as "50,000,000"
    #[serde(default, deserialize_with = "amount_text")]
    pub totalamt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector1: Option<SectorRef>,
    #[serde(
        default,
        rename = "mjsector1Name",
        skip_serializing_if = "Option::is_none"
    )]
    pub mjsector1_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boardapprovaldate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `{"Name": "..."}` sector reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRef {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Upstream sends a single country as a string and multi-country projects
/// as an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountryNames {
    One(String),
    Many(Vec<String>),
}

impl Default for CountryNames {
    fn default() -> Self {
        Self::One(String::new())
    }
}

impl CountryNames {
    pub fn primary(&self) -> &str {
        match self {
            Self::One(name) => name,
            Self::Many(names) => names.first().map(String::as_str).unwrap_or_default(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::One(name) => name.clone(),
            Self::Many(names) => names.join(", "),
        }
    }
}

impl Project {
    /// First listed country, or an empty string.
    pub fn primary_country(&self) -> &str {
        self.countryname.primary()
    }

    pub fn display_status(&self) -> &str {
        self.projectstatusdisplay
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.status)
    }

    /// `sector1.Name`, else the major sector name.
    pub fn sector_name(&self) -> Option<&str> {
        self.sector1
            .as_ref()
            .map(|s| s.name.as_str())
            .or(self.mjsector1_name.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Financing amount in whole dollars; unparseable amounts count as zero.
    pub fn financing_amount(&self) -> u64 {
        parse_amount(&self.totalamt)
    }

    /// Coarse topical domain used to template research queries.
    pub fn domain(&self) -> String {
        classify_domain(&self.project_name, self.sector_name())
    }

    pub fn research_subject(&self) -> ResearchSubject {
        ResearchSubject {
            name: self.project_name.clone(),
            sector: self.sector_name().map(str::to_string),
            country: self.primary_country().to_string(),
        }
    }
}

/// Leading digits of an amount once thousands separators are removed.
pub fn parse_amount(raw: &str) -> u64 {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(s) => s,
        Amount::Number(n) => n.to_string(),
        Amount::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(value: serde_json::Value) -> Project {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let p = project(json!({
            "id": "P178123",
            "project_name": "Digital Kenya Acceleration",
            "countryname": ["Republic of Kenya", "Uganda"],
            "regionname": "Eastern and Southern Africa",
            "status": "Active",
            "totalamt": "390,000,000",
            "sector1": {"Name": "ICT Services"},
            "mjsector1Name": "Information and Communications Technologies"
        }));

        assert_eq!(p.primary_country(), "Republic of Kenya");
        assert_eq!(p.countryname.display(), "Republic of Kenya, Uganda");
        assert_eq!(p.sector_name(), Some("ICT Services"));
        assert_eq!(p.financing_amount(), 390_000_000);
        assert_eq!(p.display_status(), "Active");
        assert_eq!(p.domain(), "digital economy");
    }

    #[test]
    fn test_lenient_fields() {
        let p = project(json!({
            "id": "P1",
            "project_name": "Program for Results",
            "countryname": "Peru",
            "totalamt": 25000000,
            "projectstatusdisplay": "Pipeline",
            "mjsector1Name": "Social Protection"
        }));

        assert_eq!(p.totalamt, "25000000");
        assert_eq!(p.financing_amount(), 25_000_000);
        assert_eq!(p.display_status(), "Pipeline");
        assert_eq!(p.sector_name(), Some("Social Protection"));
        assert_eq!(p.domain(), "social protection");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250,000"), 1_250_000);
        assert_eq!(parse_amount("12.5"), 12);
        assert_eq!(parse_amount("TBD"), 0);
        assert_eq!(parse_amount(""), 0);
    }

    #[test]
    fn test_empty_country_list() {
        let p = project(json!({"id": "P2", "project_name": "X", "countryname": []}));
        assert_eq!(p.primary_country(), "");
    }
}
