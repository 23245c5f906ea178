use super::extract::extract_object;
use super::prompt::{normalize_category, PromptConfig};
use super::FALLBACK_CATEGORY;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// Score used when the reply omits `quality_score` or it is not numeric
pub const NEUTRAL_SCORE: u8 = 5;

/// The vision model's judgment of one candidate photo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalysisRecord {
    /// Always within [MIN_SCORE, MAX_SCORE]
    pub quality_score: u8,

    /// Always a member of the active category set
    pub category: String,

    pub description: String,

    pub represents_place: bool,

    pub reasoning: String,
}

/// Turn a raw model reply into an [`AnalysisRecord`].
///
/// Lenient on field content: scores are clamped, unknown categories become
/// the fallback category, a missing or non-boolean `represents_place` counts
/// as `true`, and missing text fields are empty. Only a reply with no
/// recoverable JSON object is an error.
pub fn validate(raw: &str, prompt: &PromptConfig) -> Result<AnalysisRecord, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let obj = extract_object(raw).ok_or(ValidationError::NoObject)?;

    let quality_score = obj
        .get("quality_score")
        .and_then(coerce_score)
        .map(|score| score.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8)
        .unwrap_or(NEUTRAL_SCORE);

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .map(normalize_category)
        .filter(|c| prompt.recognizes(c))
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let represents_place = match obj.get("represents_place") {
        Some(Value::Bool(b)) => *b,
        _ => true,
    };

    Ok(AnalysisRecord {
        quality_score,
        category,
        description: text_field(&obj, "description"),
        represents_place,
        reasoning: text_field(&obj, "reasoning"),
    })
}

fn coerce_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64)),
        // Accept "8", "8.5" and "8/10"
        Value::String(s) => s
            .split('/')
            .next()
            .and_then(|head| head.trim().parse::<f64>().ok())
            .filter(|f| f.is_finite())
            .map(|f| f.round() as i64),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
