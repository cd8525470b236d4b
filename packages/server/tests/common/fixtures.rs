//! Test fixtures in the wire format the endpoints accept.

use serde_json::{json, Value};

/// A project as returned by the project search.
pub fn project_json(id: &str, name: &str, country: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "project_name": name,
        "countryname": country,
        "regionname": "Eastern and Southern Africa",
        "status": "Active",
        "totalamt": amount,
        "sector1": {"Name": "Urban Transport"}
    })
}

/// A minimal score with the given overall value.
pub fn score_json(overall: f64, primary: &str) -> Value {
    json!({
        "emerging_tech": {"score": 6},
        "foresight": {"score": 6},
        "collective_intelligence": {"score": 6},
        "relevance": {"score": 6},
        "overall_score": overall,
        "primary_dimension": primary,
        "top_opportunities": [{
            "opportunity": "Open data challenge",
            "dimension": primary,
            "approach": "Innovation Challenge"
        }],
        "key_insight": "Local partners are ready."
    })
}

/// A project carrying a score, as posted to the report endpoint.
pub fn scored_project_json(id: &str, overall: f64, amount: &str) -> Value {
    let mut project = project_json(id, &format!("Project {id}"), "Kenya", amount);
    project["score"] = score_json(overall, "foresight");
    project
}
