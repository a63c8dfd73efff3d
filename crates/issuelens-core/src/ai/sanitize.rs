// SPDX-License-Identifier: Apache-2.0

//! Model output sanitizing.
//!
//! The model is asked for a bare JSON object but routinely wraps it in prose or
//! markdown fences, omits keys, or returns labels in the wrong shape. This
//! module recovers the object and coerces it into a complete
//! [`AnalysisResult`]. Nothing here fails: unusable output becomes a fallback.

use serde_json::{Map, Value};
use tracing::warn;

use super::types::{AnalysisResult, IssueType};

/// Summary used when no object delimiters are present.
pub const NO_JSON_FOUND: &str = "No JSON found in response";
/// Summary used when the delimited text is not a JSON object.
pub const JSON_PARSE_ERROR: &str = "JSON parse error";

const FALLBACK_PRIORITY: &str = "1 - Unable to determine priority due to error";
const FALLBACK_IMPACT: &str = "LLM failed to return valid JSON";
const DEFAULT_SUMMARY: &str = "No summary provided";
const DEFAULT_PRIORITY: &str = "1 - Default score";
const DEFAULT_IMPACT: &str = "Unknown";
const MAX_LABELS: usize = 3;

/// Builds a schema-complete result carrying `message` as its summary.
#[must_use]
pub fn fallback(message: &str) -> AnalysisResult {
    AnalysisResult {
        summary: message.to_string(),
        issue_type: IssueType::Other,
        priority_score: FALLBACK_PRIORITY.to_string(),
        suggested_labels: Vec::new(),
        potential_impact: FALLBACK_IMPACT.to_string(),
    }
}

impl AnalysisResult {
    /// Whether this is a degraded result produced by [`fallback`] rather than
    /// a usable model classification.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.issue_type == IssueType::Other
            && self.suggested_labels.is_empty()
            && self.priority_score == FALLBACK_PRIORITY
            && self.potential_impact == FALLBACK_IMPACT
    }
}

fn fallback_object(message: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("summary".to_string(), Value::from(message));
    map.insert("type".to_string(), Value::from(IssueType::Other.as_str()));
    map.insert("priority_score".to_string(), Value::from(FALLBACK_PRIORITY));
    map.insert("suggested_labels".to_string(), Value::Array(Vec::new()));
    map.insert("potential_impact".to_string(), Value::from(FALLBACK_IMPACT));
    map
}

/// Pulls the outermost JSON object out of free-form model output.
///
/// Takes the text from the first `{` to the last `}` inclusive. If either
/// delimiter is missing, or the slice does not parse as a JSON object, the
/// fallback object is returned instead.
#[must_use]
pub fn extract_json(text: &str) -> Map<String, Value> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        warn!("No JSON object delimiters in model output");
        return fallback_object(NO_JSON_FOUND);
    };
    if start > end {
        warn!("No JSON object delimiters in model output");
        return fallback_object(NO_JSON_FOUND);
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Model output is JSON but not an object");
            fallback_object(JSON_PARSE_ERROR)
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse model output as JSON");
            fallback_object(JSON_PARSE_ERROR)
        }
    }
}

/// JSON falsiness: null, false, zero, and empty strings, arrays, and objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Strings verbatim, everything else as its JSON text.
fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn normalize_labels(value: Option<Value>) -> Vec<String> {
    let items = match value {
        Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter(|item| !is_falsy(item))
        .map(|item| stringify(item).trim().to_string())
        .filter(|label| !label.is_empty())
        .take(MAX_LABELS)
        .collect()
}

fn string_or(value: Option<Value>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), stringify)
}

/// Coerces a parsed model object into a complete [`AnalysisResult`].
///
/// Missing keys get defaults, scalars are stringified, labels are flattened to
/// at most three trimmed non-empty strings, and `type` is mapped onto
/// [`IssueType`].
#[must_use]
pub fn normalize(mut data: Map<String, Value>) -> AnalysisResult {
    let issue_type = match data.remove("type") {
        None => IssueType::Other,
        Some(value) => IssueType::from_label(&stringify(value)),
    };

    AnalysisResult {
        summary: string_or(data.remove("summary"), DEFAULT_SUMMARY),
        issue_type,
        priority_score: string_or(data.remove("priority_score"), DEFAULT_PRIORITY),
        suggested_labels: normalize_labels(data.remove("suggested_labels")),
        potential_impact: string_or(data.remove("potential_impact"), DEFAULT_IMPACT),
    }
}

/// Extracts and normalizes in one step.
#[must_use]
pub fn sanitize(text: &str) -> AnalysisResult {
    normalize(extract_json(text))
}
