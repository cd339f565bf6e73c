//! Structured-output contract for the classification call.
//!
//! `HotDogVerdict` is the shape the vision model must return. Anything that
//! fails `validate()` is rejected as schema-invalid model output before it
//! can reach the store.

use crate::error::{HotDogError, Result};
use serde::{Deserialize, Serialize};

/// Fixed classification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotDogCategory {
    /// Definitive hot dog (sausage in a bun)
    HotDog,
    /// Sausage, bratwurst, corn dog, etc.
    HotDogAdjacent,
    /// Definitely not a hot dog
    NotHotDog,
    /// Drawing, costume, logo, etc.
    ArtisticHotDog,
}

impl HotDogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotDogCategory::HotDog => "HOT_DOG",
            HotDogCategory::HotDogAdjacent => "HOT_DOG_ADJACENT",
            HotDogCategory::NotHotDog => "NOT_HOT_DOG",
            HotDogCategory::ArtisticHotDog => "ARTISTIC_HOT_DOG",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "HOT_DOG" => Ok(HotDogCategory::HotDog),
            "HOT_DOG_ADJACENT" => Ok(HotDogCategory::HotDogAdjacent),
            "NOT_HOT_DOG" => Ok(HotDogCategory::NotHotDog),
            "ARTISTIC_HOT_DOG" => Ok(HotDogCategory::ArtisticHotDog),
            other => Err(HotDogError::Ai(format!("unknown category '{}'", other))),
        }
    }
}

/// Structured result of one classification call.
///
/// Wire names are camelCase, matching the JSON contract given to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotDogVerdict {
    /// True if the image contains a real hot dog
    pub is_hot_dog: bool,

    /// Confidence score from 0-100
    pub confidence: f64,

    /// Classification category
    pub category: HotDogCategory,

    /// Number of hot dogs detected in the image
    #[serde(default)]
    pub hot_dog_count: u32,

    /// Regional hot dog style if identifiable (Chicago, New York, Sonoran, ...)
    #[serde(default)]
    pub style: Option<String>,

    /// Brief explanation of the analysis decision
    pub reasoning: String,

    /// Items detected in the image, in the order the model listed them
    #[serde(default)]
    pub detected_items: Vec<String>,
}

impl HotDogVerdict {
    /// Checks the field constraints the deserializer cannot express.
    ///
    /// An empty `style` string is normalized to `None` so the canonical
    /// `style: null` contract holds downstream.
    pub fn validate(mut self) -> Result<Self> {
        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(HotDogError::Ai(format!(
                "confidence {} is outside [0, 100]",
                self.confidence
            )));
        }

        if self.reasoning.trim().is_empty() {
            return Err(HotDogError::Ai("reasoning must not be empty".into()));
        }

        if let Some(style) = &self.style {
            if style.trim().is_empty() {
                self.style = None;
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict() -> HotDogVerdict {
        HotDogVerdict {
            is_hot_dog: true,
            confidence: 92.5,
            category: HotDogCategory::HotDog,
            hot_dog_count: 1,
            style: Some("Chicago".into()),
            reasoning: "Sausage in a poppy seed bun".into(),
            detected_items: vec!["bun".into(), "mustard".into()],
        }
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&HotDogCategory::HotDogAdjacent).unwrap();
        assert_eq!(json, "\"HOT_DOG_ADJACENT\"");

        let parsed: HotDogCategory = serde_json::from_str("\"ARTISTIC_HOT_DOG\"").unwrap();
        assert_eq!(parsed, HotDogCategory::ArtisticHotDog);
    }

    #[test]
    fn test_category_rejects_unknown() {
        let result = serde_json::from_str::<HotDogCategory>("\"SANDWICH\"");
        assert!(result.is_err());
        assert!(HotDogCategory::parse("SANDWICH").is_err());
    }

    #[test]
    fn test_category_roundtrip_str() {
        for category in [
            HotDogCategory::HotDog,
            HotDogCategory::HotDogAdjacent,
            HotDogCategory::NotHotDog,
            HotDogCategory::ArtisticHotDog,
        ] {
            assert_eq!(HotDogCategory::parse(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn test_verdict_camel_case_wire_names() {
        let json = serde_json::to_value(verdict()).unwrap();
        assert!(json.get("isHotDog").is_some());
        assert!(json.get("hotDogCount").is_some());
        assert!(json.get("detectedItems").is_some());
        assert!(json.get("is_hot_dog").is_none());
    }

    #[test]
    fn test_validate_accepts_valid_verdict() {
        assert!(verdict().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_confidence() {
        let mut v = verdict();
        v.confidence = 150.0;
        assert!(matches!(v.validate(), Err(HotDogError::Ai(_))));

        let mut v = verdict();
        v.confidence = -1.0;
        assert!(matches!(v.validate(), Err(HotDogError::Ai(_))));
    }

    #[test]
    fn test_validate_rejects_empty_reasoning() {
        let mut v = verdict();
        v.reasoning = "  ".into();
        assert!(matches!(v.validate(), Err(HotDogError::Ai(_))));
    }

    #[test]
    fn test_validate_normalizes_empty_style() {
        let mut v = verdict();
        v.style = Some("".into());
        assert_eq!(v.validate().unwrap().style, None);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let v: HotDogVerdict = serde_json::from_str(
            r#"{"isHotDog": false, "confidence": 10.0, "category": "NOT_HOT_DOG",
                "reasoning": "It is a sandwich"}"#,
        )
        .unwrap();
        assert_eq!(v.hot_dog_count, 0);
        assert_eq!(v.style, None);
        assert!(v.detected_items.is_empty());
    }
}
