//! Regex-driven entity extractor.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::extraction::datetime::extract_datetime;
use crate::extraction::number::extract_numbers;
use crate::extraction::text::extract_text;
use crate::extraction::units::extract_units;
use crate::extraction::{EntityExtractor, EntityKind, Extraction};
use crate::intent::types::IntentResult;

/// Entity extractor built from fixed patterns.
///
/// Relative dates resolve against the reference time given with
/// [`with_reference_time`](Self::with_reference_time), or the local clock
/// at extraction time when none is set.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedExtractor {
    reference_time: Option<NaiveDateTime>,
}

impl RuleBasedExtractor {
    /// Create an extractor that resolves against the local clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative dates against a fixed time.
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// The time relative expressions resolve against.
    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Record one sub-extraction on the result.
    fn apply<T: Serialize>(
        &self,
        kind: EntityKind,
        text: &str,
        extraction: Extraction<T>,
        result: &mut IntentResult,
    ) {
        match extraction {
            Extraction::Found(value) => match serde_json::to_value(value) {
                Ok(value) => result.set_entity(kind.as_str(), value),
                Err(e) => log::warn!("failed to serialize {kind} entity for {text:?}: {e}"),
            },
            Extraction::Missing => {}
            Extraction::Failed(reason) => {
                log::warn!("{kind} extraction failed for {text:?}: {reason}");
            }
        }
    }
}

impl EntityExtractor for RuleBasedExtractor {
    fn extract(&self, text: &str, result: &mut IntentResult) {
        let reference = self.reference_time();

        self.apply(
            EntityKind::DateTime,
            text,
            extract_datetime(text, reference),
            result,
        );
        self.apply(EntityKind::Number, text, extract_numbers(text), result);
        self.apply(EntityKind::Units, text, extract_units(text), result);
        self.apply(EntityKind::Text, text, extract_text(text), result);

        if result.entity(EntityKind::Text.as_str()).is_none() {
            result.set_entity(EntityKind::Text.as_str(), serde_json::Value::from(text));
        }

        log::trace!(
            "extracted {:?} from {:?}",
            result.entities.keys().collect::<Vec<_>>(),
            text
        );
    }

    fn name(&self) -> &str {
        "rule_based"
    }
}
