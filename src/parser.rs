//! Model response parsing.
//!
//! Extracts the JSON object from a model response that may wrap it in
//! ```json fences or stray prose, then deserializes and validates it into a
//! `HotDogVerdict`.

use crate::error::{HotDogError, Result};
use crate::schema::HotDogVerdict;

/// Extracts the JSON object portion of a model response.
///
/// Extraction order:
/// 1. ```json ... ``` block
/// 2. raw {...} object
/// 3. error
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` block
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // length of "```json"
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // raw {...}
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(HotDogError::Ai("no JSON object in model response".into()))
}

/// Parses and validates a classification response.
pub fn parse_verdict(response: &str) -> Result<HotDogVerdict> {
    let json_str = extract_json(response)?;
    let verdict: HotDogVerdict = serde_json::from_str(json_str.trim())
        .map_err(|e| HotDogError::Ai(format!("schema-invalid model output: {}", e)))?;
    verdict.validate()
}
