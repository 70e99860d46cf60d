//! Keyword-based intent classifier.
//!
//! Matches literal keywords as substrings of the lowercased command. No
//! tokenization or stop-word removal happens here, which lets the table hold
//! multi-word phrases ("write down") and words that must be followed by a
//! space ("to ", "for ").

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::intent::classifier::IntentClassifier;
use crate::intent::types::{IntentResult, KnownIntent};

/// Confidence for a single keyword hit before the per-hit increment.
const BASE_CONFIDENCE: f64 = 0.4;
/// Confidence added per keyword hit.
const CONFIDENCE_PER_HIT: f64 = 0.3;
/// Upper bound on keyword confidence.
const MAX_CONFIDENCE: f64 = 0.95;

/// One keyword → intent mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Literal substring to look for. Trailing spaces are significant.
    pub keyword: String,
    /// Intent credited with a hit when the keyword occurs.
    pub intent: String,
}

impl KeywordEntry {
    /// Create an entry. The keyword is lowercased so it can match the
    /// lowercased command text.
    pub fn new<K: Into<String>, I: Into<String>>(keyword: K, intent: I) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            intent: intent.into(),
        }
    }
}

/// Ordered keyword table.
///
/// Order matters for tie-breaking: intents rank by the position of their
/// first entry, and the earliest-ranked intent wins a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<KeywordEntry>", into = "Vec<KeywordEntry>")]
pub struct KeywordTable {
    entries: Vec<KeywordEntry>,
}

impl KeywordTable {
    /// Create a table from entries, keeping their order.
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| !entry.keyword.is_empty())
            .map(|entry| KeywordEntry::new(entry.keyword, entry.intent))
            .collect();
        Self { entries }
    }

    /// Create a table from `(keyword, intent)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(keyword, intent)| KeywordEntry::new(keyword, intent))
                .collect(),
        )
    }

    /// The built-in table for reminders, notes, timers and conversions.
    pub fn builtin() -> Self {
        let reminder = KnownIntent::Reminder.as_str();
        let note = KnownIntent::Note.as_str();
        let timer = KnownIntent::Timer.as_str();
        let convert = KnownIntent::Convert.as_str();

        Self::from_pairs([
            ("remind", reminder),
            ("reminder", reminder),
            ("don't forget", reminder),
            ("alert me", reminder),
            ("note", note),
            ("write down", note),
            ("jot", note),
            ("memo", note),
            ("timer", timer),
            ("countdown", timer),
            ("stopwatch", timer),
            ("for ", timer),
            ("convert", convert),
            ("how many", convert),
            ("to ", convert),
            ("into ", convert),
        ])
    }

    /// Entries in table order.
    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<Vec<KeywordEntry>> for KeywordTable {
    fn from(entries: Vec<KeywordEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<KeywordTable> for Vec<KeywordEntry> {
    fn from(table: KeywordTable) -> Self {
        table.entries
    }
}

/// Keyword-based intent classifier.
///
/// Confidence is a linear ramp on the hit count of the winning intent,
/// `min(0.95, 0.4 + 0.3 × hits)`: one hit gives 0.7, two or more give 0.95.
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    table: KeywordTable,
}

impl KeywordClassifier {
    /// Create a keyword classifier over the given table.
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    /// Get the keyword table.
    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Confidence for a given number of hits on the winning intent.
    pub fn confidence_for_hits(hits: usize) -> f64 {
        if hits == 0 {
            0.0
        } else {
            (BASE_CONFIDENCE + CONFIDENCE_PER_HIT * hits as f64).min(MAX_CONFIDENCE)
        }
    }

    /// Count hits per intent, in the ranking order of each intent's first
    /// table entry. Intents without hits are included with a zero count.
    pub fn hit_counts(&self, text: &str) -> Vec<(&str, usize)> {
        let lowered = text.to_lowercase();
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for entry in self.table.entries() {
            let hit = usize::from(lowered.contains(entry.keyword.as_str()));
            match counts.iter_mut().find(|(intent, _)| *intent == entry.intent) {
                Some((_, count)) => *count += hit,
                None => counts.push((entry.intent.as_str(), hit)),
            }
        }

        counts
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<IntentResult> {
        let mut best: Option<(&str, usize)> = None;
        for (intent, hits) in self.hit_counts(text) {
            if hits > best.map_or(0, |(_, best_hits)| best_hits) {
                best = Some((intent, hits));
            }
        }

        let result = match best {
            Some((intent, hits)) => {
                IntentResult::new(intent, Self::confidence_for_hits(hits), text)
            }
            None => IntentResult::unknown(0.0, text),
        };

        log::trace!(
            "keyword classifier: {:?} -> {} ({:.2})",
            text,
            result.intent,
            result.confidence
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> IntentResult {
        KeywordClassifier::default().classify(text).unwrap()
    }

    #[test]
    fn test_single_hit_confidence() {
        let result = classify("remind me to call mom");
        assert_eq!(result.intent, "reminder");
        assert!((result.confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_two_hits_saturate() {
        let result = classify("set timer for 10 minutes");
        assert_eq!(result.intent, "timer");
        assert!((result.confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_no_hits_is_unknown() {
        let result = classify("what is the weather like");
        assert_eq!(result.intent, "unknown");
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.raw_text, "what is the weather like");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("Take a NOTE").intent, "note");
    }

    #[test]
    fn test_trailing_space_keywords_need_a_following_space() {
        let table = KeywordTable::from_pairs([("to ", "convert")]);
        let classifier = KeywordClassifier::new(table);
        assert_eq!(classifier.classify("tomato").unwrap().intent, "unknown");
        assert_eq!(classifier.classify("go to bed").unwrap().intent, "convert");
        // Keyword at the very end of the text has no trailing space.
        assert_eq!(classifier.classify("go to").unwrap().intent, "unknown");
    }

    #[test]
    fn test_tie_goes_to_earliest_intent_in_table() {
        let table = KeywordTable::from_pairs([("alpha", "first"), ("beta", "second")]);
        let classifier = KeywordClassifier::new(table);
        assert_eq!(classifier.classify("beta alpha").unwrap().intent, "first");

        let table = KeywordTable::from_pairs([("beta", "second"), ("alpha", "first")]);
        let classifier = KeywordClassifier::new(table);
        assert_eq!(classifier.classify("beta alpha").unwrap().intent, "second");
    }

    #[test]
    fn test_more_hits_beat_table_order() {
        let table = KeywordTable::from_pairs([
            ("alpha", "first"),
            ("beta", "second"),
            ("gamma", "second"),
        ]);
        let classifier = KeywordClassifier::new(table);
        let result = classifier.classify("alpha beta gamma").unwrap();
        assert_eq!(result.intent, "second");
        assert!((result.confidence - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_confidence_ramp_is_monotonic_and_capped() {
        let mut previous = 0.0;
        for hits in 0..10 {
            let confidence = KeywordClassifier::confidence_for_hits(hits);
            assert!(confidence >= previous);
            assert!(confidence <= 0.95);
            previous = confidence;
        }
        assert_eq!(KeywordClassifier::confidence_for_hits(0), 0.0);
    }

    #[test]
    fn test_keywords_are_lowercased() {
        let table = KeywordTable::from_pairs([("Stopwatch", "timer")]);
        assert_eq!(table.entries()[0].keyword, "stopwatch");
        let classifier = KeywordClassifier::new(table);
        assert_eq!(classifier.classify("STOPWATCH please").unwrap().intent, "timer");
    }

    #[test]
    fn test_empty_table_never_matches() {
        let classifier = KeywordClassifier::new(KeywordTable::new(Vec::new()));
        assert!(classifier.table().is_empty());
        assert!(classifier.classify("remind me").unwrap().is_unknown());
    }

    #[test]
    fn test_table_serde_is_a_plain_list() {
        let table = KeywordTable::from_pairs([("jot", "note")]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"keyword":"jot","intent":"note"}]"#);
        let parsed: KeywordTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);

        let parsed: KeywordTable =
            serde_json::from_str(r#"[{"keyword":"MEMO","intent":"note"}]"#).unwrap();
        assert_eq!(parsed.entries()[0].keyword, "memo");
    }
}
