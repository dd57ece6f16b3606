/*!
 * Tolerant parsing of model output.
 *
 * Models are asked for bare JSON but often wrap it in a markdown fence.
 * A `json`-tagged fence wins over an untagged one; an unterminated fence
 * runs to the end of the response.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::errors::AttemptError;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json(.*?)(?:```|\z)").expect("valid regex"));

static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)(?:```|\z)").expect("valid regex"));

/// Return the first fenced segment, or the trimmed input when there is none
pub fn extract_json_payload(raw: &str) -> &str {
    let raw = raw.trim();
    JSON_FENCE
        .captures(raw)
        .or_else(|| ANY_FENCE.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(raw)
}

/// Strip fencing and deserialize the payload into the expected shape
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, AttemptError> {
    let payload = extract_json_payload(raw);
    serde_json::from_str(payload).map_err(|e| AttemptError::Unparseable(e.to_string()))
}
