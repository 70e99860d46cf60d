//! Common types for intent classification.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HalberdError;

/// Intent label reported when no classifier could decide.
pub const UNKNOWN_INTENT: &str = "unknown";

/// Outcome of classifying one command.
///
/// Created fresh by every `classify` call. The entity extractor adds keys to
/// `entities`; after that the result is handed to dispatch unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    /// Predicted intent label, or [`UNKNOWN_INTENT`].
    pub intent: String,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// The command text exactly as received.
    pub raw_text: String,
    /// Extracted entities keyed by entity kind (`datetime`, `number`, ...).
    #[serde(default)]
    pub entities: BTreeMap<String, serde_json::Value>,
}

impl IntentResult {
    /// Create a labeled result. Confidence is clamped into `[0.0, 1.0]`.
    pub fn new<I: Into<String>, T: Into<String>>(intent: I, confidence: f64, raw_text: T) -> Self {
        Self {
            intent: intent.into(),
            confidence: clamp_confidence(confidence),
            raw_text: raw_text.into(),
            entities: BTreeMap::new(),
        }
    }

    /// Create an `unknown` result carrying the given confidence.
    pub fn unknown<T: Into<String>>(confidence: f64, raw_text: T) -> Self {
        Self::new(UNKNOWN_INTENT, confidence, raw_text)
    }

    /// True when the intent is `unknown` or blank.
    pub fn is_unknown(&self) -> bool {
        let intent = self.intent.trim();
        intent.is_empty() || intent == UNKNOWN_INTENT
    }

    /// Look up an extracted entity.
    pub fn entity(&self, kind: &str) -> Option<&serde_json::Value> {
        self.entities.get(kind)
    }

    /// Add or replace an entity.
    pub fn set_entity<K: Into<String>>(&mut self, kind: K, value: serde_json::Value) {
        self.entities.insert(kind.into(), value);
    }

    /// Parse the intent label into a [`KnownIntent`], if it is one.
    pub fn known_intent(&self) -> Option<KnownIntent> {
        self.intent.parse().ok()
    }
}

/// Map NaN to 0 and clamp everything else into `[0.0, 1.0]`.
pub(crate) fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// Check that a threshold is finite and within `[0.0, 1.0]`.
pub(crate) fn validate_threshold(name: &str, value: f64) -> crate::error::Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(HalberdError::invalid_argument(format!(
            "{name} must be within [0.0, 1.0], got {value}"
        )))
    }
}

/// The intents the built-in keyword table and example corpus cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownIntent {
    /// Remind the user about something later.
    Reminder,
    /// Record a note.
    Note,
    /// Start a countdown.
    Timer,
    /// Convert a quantity between units.
    Convert,
}

impl KnownIntent {
    /// All known intents in declaration order.
    pub const ALL: [KnownIntent; 4] = [
        KnownIntent::Reminder,
        KnownIntent::Note,
        KnownIntent::Timer,
        KnownIntent::Convert,
    ];

    /// The label used in results, corpora and keyword tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownIntent::Reminder => "reminder",
            KnownIntent::Note => "note",
            KnownIntent::Timer => "timer",
            KnownIntent::Convert => "convert",
        }
    }
}

impl fmt::Display for KnownIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownIntent {
    type Err = HalberdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reminder" => Ok(KnownIntent::Reminder),
            "note" => Ok(KnownIntent::Note),
            "timer" => Ok(KnownIntent::Timer),
            "convert" => Ok(KnownIntent::Convert),
            other => Err(HalberdError::invalid_argument(format!(
                "unknown intent: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_detection() {
        assert!(IntentResult::unknown(0.3, "hello").is_unknown());
        assert!(IntentResult::new("  ", 0.9, "hello").is_unknown());
        assert!(!IntentResult::new("note", 0.7, "note this").is_unknown());
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(IntentResult::new("note", 1.0000000002, "x").confidence, 1.0);
        assert_eq!(IntentResult::new("note", -0.1, "x").confidence, 0.0);
        assert_eq!(IntentResult::new("note", f64::NAN, "x").confidence, 0.0);
    }

    #[test]
    fn test_threshold_validation() {
        assert_eq!(validate_threshold("t", 0.0).unwrap(), 0.0);
        assert_eq!(validate_threshold("t", 1.0).unwrap(), 1.0);
        assert!(validate_threshold("t", 1.5).is_err());
        assert!(validate_threshold("t", -0.01).is_err());
        assert!(validate_threshold("t", f64::NAN).is_err());
        assert!(validate_threshold("t", f64::INFINITY).is_err());
    }

    #[test]
    fn test_entities() {
        let mut result = IntentResult::new("timer", 0.95, "set timer for 10 minutes");
        assert!(result.entity("number").is_none());
        result.set_entity("number", serde_json::json!([10.0]));
        assert_eq!(result.entity("number"), Some(&serde_json::json!([10.0])));
    }

    #[test]
    fn test_known_intent_parsing() {
        assert_eq!("Timer".parse::<KnownIntent>().unwrap(), KnownIntent::Timer);
        assert!("weather".parse::<KnownIntent>().is_err());
        for intent in KnownIntent::ALL {
            assert_eq!(intent.as_str().parse::<KnownIntent>().unwrap(), intent);
        }
        let result = IntentResult::new("convert", 0.7, "convert 5 km to miles");
        assert_eq!(result.known_intent(), Some(KnownIntent::Convert));
        assert_eq!(IntentResult::unknown(0.0, "").known_intent(), None);
    }

    #[test]
    fn test_serialization_shape() {
        let result = IntentResult::new("note", 0.7, "note milk");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["intent"], "note");
        assert_eq!(value["raw_text"], "note milk");
        assert!(value["entities"].as_object().unwrap().is_empty());
    }
}
