//! Free-text payload extraction.

use std::sync::LazyLock;

use crate::extraction::Extraction;

/// Leading phrases that introduce a command rather than belong to its
/// payload. Checked longest first.
const TRIGGER_PHRASES: &[&str] = &[
    "set a reminder to",
    "set a reminder for",
    "set a reminder",
    "remind me to",
    "remind me about",
    "remind me",
    "don't forget to",
    "don't forget",
    "alert me to",
    "alert me about",
    "alert me",
    "take a note that",
    "take a note of",
    "take a note",
    "take note of",
    "take note that",
    "make a note that",
    "make a note of",
    "make a note",
    "note that",
    "note down",
    "note",
    "write down that",
    "write down",
    "jot down",
    "jot",
    "memo",
    "set a timer for",
    "set timer for",
    "start a timer for",
    "start a timer",
    "timer for",
    "start a countdown for",
    "countdown for",
    "convert",
    "how many",
];

static TRIGGERS_LONGEST_FIRST: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut phrases = TRIGGER_PHRASES.to_vec();
    phrases.sort_by(|a, b| b.len().cmp(&a.len()));
    phrases
});

/// Strip a leading trigger phrase (case-insensitive, whole words only).
///
/// Returns `None` when the text does not start with a trigger phrase.
pub fn strip_trigger(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    TRIGGERS_LONGEST_FIRST.iter().find_map(|phrase| {
        let head = trimmed.get(..phrase.len())?;
        if !head.eq_ignore_ascii_case(phrase) {
            return None;
        }
        let rest = trimmed.get(phrase.len()..)?;
        match rest.chars().next() {
            None => Some(rest),
            Some(c) if !c.is_alphanumeric() => Some(rest),
            Some(_) => None,
        }
    })
}

/// The command payload: the text after its trigger phrase, or the raw text
/// when nothing is left after stripping.
pub fn extract_text(text: &str) -> Extraction<String> {
    let payload = strip_trigger(text)
        .map(|rest| rest.trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == ','))
        .map(str::trim_end)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(text);

    Extraction::Found(payload.to_string())
}
