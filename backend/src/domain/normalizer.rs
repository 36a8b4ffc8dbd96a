//! Turns upstream generation text into structured results.
//!
//! Fitness plans arrive inside a fenced markdown block and are extracted field
//! by field, each with its own default. Medication catalogues arrive as a bare
//! JSON object. Any failure can be replaced by the fixed degraded result of the
//! matching kind.

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::generation::GenerationKind;

/// Placeholder for missing fitness text fields.
pub const NOT_AVAILABLE: &str = "N/A";
/// Text used for every fitness string field in the degraded result.
pub const FITNESS_DEGRADED_TEXT: &str = "An error occurred while fetching your fitness plan.";

/// Structured fitness plan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FitnessPlan {
    /// Up to five exercise names.
    pub exercises: Vec<String>,
    /// Total daily exercise time.
    pub daily_time: String,
    /// Exercise name to allocated time.
    #[schema(value_type = Object)]
    pub time_allocation: Map<String, Value>,
    /// Estimated daily calories burned.
    pub calories_burned: String,
    /// Dietary recommendations.
    pub diet: String,
}

impl FitnessPlan {
    /// Plan returned when generation or parsing failed.
    pub fn degraded() -> Self {
        Self::filled_with(FITNESS_DEGRADED_TEXT)
    }

    /// Plan returned when nothing was asked.
    pub fn empty() -> Self {
        Self::filled_with("")
    }

    fn filled_with(text: &str) -> Self {
        Self {
            exercises: Vec::new(),
            daily_time: text.to_owned(),
            time_allocation: Map::new(),
            calories_burned: text.to_owned(),
            diet: text.to_owned(),
        }
    }
}

/// One medication entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Medication {
    /// Medication name.
    pub name: String,
    /// Image URL, usually a placeholder.
    pub image: String,
    /// Free-text description.
    pub info: String,
}

/// Medication catalogue split by strength.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MedicationCatalog {
    /// Normal and low power medicines.
    pub low_power_meds: Vec<Medication>,
    /// Antibiotics or high power medicines.
    pub high_power_meds: Vec<Medication>,
}

/// Result of one generation call, by kind.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum StructuredResult {
    /// Fitness plan.
    Fitness(FitnessPlan),
    /// Medication catalogue.
    Medication(MedicationCatalog),
}

impl StructuredResult {
    /// Fixed fallback for `kind`.
    pub fn degraded(kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::Fitness => Self::Fitness(FitnessPlan::degraded()),
            GenerationKind::Medication => Self::Medication(MedicationCatalog::default()),
        }
    }

    /// Result for a request that carried no query.
    pub fn empty(kind: GenerationKind) -> Self {
        match kind {
            GenerationKind::Fitness => Self::Fitness(FitnessPlan::empty()),
            GenerationKind::Medication => Self::Medication(MedicationCatalog::default()),
        }
    }
}

/// Why upstream text could not be normalised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// No fenced JSON block was found.
    #[error("no JSON block found in generated text")]
    NoJsonBlock,
    /// The payload was not a JSON object.
    #[error("generated JSON could not be parsed: {message}")]
    Parse {
        /// Parser or shape diagnostic.
        message: String,
    },
}

impl NormalizeError {
    fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

/// Normalise `raw` into the result shape for `kind`.
pub fn normalize(raw: &str, kind: GenerationKind) -> Result<StructuredResult, NormalizeError> {
    match kind {
        GenerationKind::Fitness => normalize_fitness(raw).map(StructuredResult::Fitness),
        GenerationKind::Medication => normalize_medication(raw).map(StructuredResult::Medication),
    }
}

/// Like [`normalize`], substituting the degraded result on failure.
pub fn normalize_or_degrade(raw: &str, kind: GenerationKind) -> StructuredResult {
    normalize(raw, kind).unwrap_or_else(|_| StructuredResult::degraded(kind))
}

const FENCE: &str = "```";

/// Locate the body of a fenced JSON block.
///
/// Fenced regions are walked in order. The first ```` ```json ```` fence
/// wins; otherwise the first bare fence whose body starts with `{` is used.
fn extract_json_block(text: &str) -> Option<&str> {
    let mut bare = None;
    let mut rest = text;
    while let Some((info, body, tail)) = next_fenced_region(rest) {
        if info.eq_ignore_ascii_case("json") {
            return Some(body);
        }
        if bare.is_none() && info.is_empty() && body.starts_with('{') {
            bare = Some(body);
        }
        rest = tail;
    }
    bare
}

/// Split off the next closed fence as `(info string, trimmed body, rest)`.
fn next_fenced_region(text: &str) -> Option<(&str, &str, &str)> {
    let (_, opened) = text.split_once(FENCE)?;
    let (inner, tail) = opened.split_once(FENCE)?;
    let (info, body) = match inner.split_once('\n') {
        Some((first, body)) if !first.trim_start().starts_with('{') => (first.trim(), body),
        _ => ("", inner),
    };
    Some((info, body.trim(), tail))
}

fn parse_object(body: &str) -> Result<Map<String, Value>, NormalizeError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(NormalizeError::parse(format!(
            "expected a JSON object, found {}",
            json_type(&other)
        ))),
        Err(err) => Err(NormalizeError::parse(err.to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text_or(map: &Map<String, Value>, key: &str, default: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_owned()
}

fn normalize_fitness(raw: &str) -> Result<FitnessPlan, NormalizeError> {
    let body = extract_json_block(raw).ok_or(NormalizeError::NoJsonBlock)?;
    let map = parse_object(body)?;

    let exercises = map
        .get("exercises")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let time_allocation = map
        .get("time_allocation")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Ok(FitnessPlan {
        exercises,
        daily_time: text_or(&map, "daily_time", NOT_AVAILABLE),
        time_allocation,
        calories_burned: text_or(&map, "calories_burned", NOT_AVAILABLE),
        diet: text_or(&map, "diet", NOT_AVAILABLE),
    })
}

fn medication_list(map: &Map<String, Value>, key: &str) -> Vec<Medication> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|entry| Medication {
                    name: text_or(entry, "name", ""),
                    image: text_or(entry, "image", ""),
                    info: text_or(entry, "info", ""),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn normalize_medication(raw: &str) -> Result<MedicationCatalog, NormalizeError> {
    let map = parse_object(raw.trim())?;
    Ok(MedicationCatalog {
        low_power_meds: medication_list(&map, "low_power_meds"),
        high_power_meds: medication_list(&map, "high_power_meds"),
    })
}
