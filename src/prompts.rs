//! Prompt construction for the classification call.
//!
//! The instruction is fixed: it names the decision criteria and pins the
//! output to the `HotDogVerdict` JSON shape so the response can be parsed
//! without free-text heuristics.

/// The four category wire names, in the order the model should consider them.
pub const CATEGORIES: &[&str] = &[
    "HOT_DOG",
    "HOT_DOG_ADJACENT",
    "NOT_HOT_DOG",
    "ARTISTIC_HOT_DOG",
];

/// Builds the classification instruction sent alongside the image.
pub fn build_classification_prompt() -> String {
    let categories = CATEGORIES.join(", ");

    format!(
        r#"Analyze this image and determine if it contains a hot dog. Consider:

- Is this a real hot dog (sausage in a bun)?
- If not a traditional hot dog, is it hot dog adjacent (corn dog, sausage, bratwurst)?
- Is it an artistic representation (drawing, costume, logo)?
- How many hot dogs are present?
- What regional style is it (Chicago, New York, Coney Island, etc.)?
- What other items are in the image?

Provide a confidence score (0-100) and clear reasoning for your decision.

## Output format (strictly this JSON object, nothing else)
{{
  "isHotDog": true/false,
  "confidence": 0-100,
  "category": "one of: {categories}",
  "hotDogCount": 0,
  "style": "regional style or null",
  "reasoning": "brief explanation",
  "detectedItems": ["item", "item"]
}}

## Notes
- category must be one of the listed values, nothing else
- style is null when no regional style is identifiable
- detectedItems may be empty but must be present
- Output the JSON object only. No surrounding prose."#
    )
}
