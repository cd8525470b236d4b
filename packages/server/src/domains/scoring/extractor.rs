//! Pull a validated [`Score`] out of free-text evaluator output.

use serde_json::Value;

use super::error::ScoringError;
use super::models::Score;

/// Numeric fields every score must carry.
pub const REQUIRED_SCORES: [&str; 4] = [
    "emerging_tech",
    "foresight",
    "collective_intelligence",
    "relevance",
];

/// Extract a score from raw evaluator text.
///
/// The first balanced `{...}` span that parses as a JSON object is used, so
/// surrounding prose and code fences are ignored.
pub fn extract_score(raw: &str) -> Result<Score, ScoringError> {
    let mut value = json_objects(raw)
        .find_map(|span| serde_json::from_str::<Value>(span).ok().filter(Value::is_object))
        .ok_or_else(|| {
            ScoringError::MalformedResponse(match first_balanced_object(raw) {
                Some(_) => "JSON object in response could not be parsed".to_string(),
                None => "no JSON object found in response".to_string(),
            })
        })?;

    normalize_required_scores(&mut value)?;

    let mut score: Score = serde_json::from_value(value)
        .map_err(|e| ScoringError::MalformedResponse(format!("unexpected score shape: {e}")))?;
    score.recompute();
    Ok(score)
}

/// Replace each `<dimension>.score` with a plain number, or report every
/// missing path at once.
fn normalize_required_scores(value: &mut Value) -> Result<(), ScoringError> {
    let mut missing = Vec::new();

    for dimension in REQUIRED_SCORES {
        let number = value
            .get(dimension)
            .and_then(|d| d.get("score"))
            .and_then(numeric);

        match (number, value.get_mut(dimension)) {
            (Some(n), Some(Value::Object(fields))) => {
                fields.insert("score".to_string(), Value::from(n));
            }
            _ => missing.push(format!("{dimension}.score")),
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScoringError::Schema(missing))
    }
}

/// A finite number, or a string holding one.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// First balanced object span, if any.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    json_objects(text).next()
}

/// Every top-level balanced `{...}` span, left to right.
///
/// Braces inside JSON strings (including escaped quotes) do not count.
fn json_objects(text: &str) -> impl Iterator<Item = &str> + '_ {
    let bytes = text.as_bytes();
    let mut cursor = 0;

    std::iter::from_fn(move || {
        while cursor < bytes.len() {
            let start = cursor + bytes[cursor..].iter().position(|b| *b == b'{')?;
            match balanced_end(&bytes[start..]) {
                Some(len) => {
                    cursor = start + len;
                    return Some(&text[start..start + len]);
                }
                None => {
                    cursor = start + 1;
                }
            }
        }
        None
    })
}

/// Length of the balanced object starting at `bytes[0] == b'{'`.
fn balanced_end(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
