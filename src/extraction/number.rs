//! Number extraction from digits and number words.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::Extraction;

/// Number words recognized on their own. Compounds such as "twenty five" are
/// reported as two numbers.
pub const NUMBER_WORDS: [(&str, f64); 27] = [
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("thirteen", 13.0),
    ("fourteen", 14.0),
    ("fifteen", 15.0),
    ("sixteen", 16.0),
    ("seventeen", 17.0),
    ("eighteen", 18.0),
    ("nineteen", 19.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("sixty", 60.0),
    ("hundred", 100.0),
    ("a dozen", 12.0),
];

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", number_alternation())).expect("Invalid regex")
});

/// Value of a number word, case-insensitive.
pub fn word_value(word: &str) -> Option<f64> {
    let word = word.trim().to_lowercase();
    NUMBER_WORDS
        .iter()
        .find(|(candidate, _)| *candidate == word)
        .map(|(_, value)| *value)
}

/// Parse one numeric token, digits or word.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().or_else(|| word_value(token))
}

/// Alternation of every number spelling, for embedding in other patterns.
pub(crate) fn number_alternation() -> String {
    let words = NUMBER_WORDS
        .iter()
        .map(|(word, _)| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"\d+(?:\.\d+)?|{words}")
}

/// Extract every number in order of appearance.
pub fn extract_numbers(text: &str) -> Extraction<Vec<f64>> {
    let numbers: Vec<f64> = NUMBER_PATTERN
        .find_iter(text)
        .filter_map(|m| parse_number(m.as_str()))
        .collect();

    if numbers.is_empty() {
        Extraction::Missing
    } else {
        Extraction::Found(numbers)
    }
}
