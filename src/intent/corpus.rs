//! Example corpus used to train the semantic classifier.
//!
//! The on-disk format is a JSON object mapping an intent name to an array of
//! example phrases:
//!
//! ```json
//! {
//!   "note": ["take a note", "write this down"],
//!   "timer": ["set a timer for five minutes"]
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HalberdError, Result};
use crate::intent::types::KnownIntent;

/// Labeled example phrases, keyed by intent.
///
/// Intents iterate in lexicographic order and phrases keep their insertion
/// order, so every classifier built from the same set behaves identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExampleSet {
    intents: BTreeMap<String, Vec<String>>,
}

impl ExampleSet {
    /// Create an empty example set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an example set from `(intent, phrases)` pairs.
    pub fn from_pairs<I, K, P, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for (intent, phrases) in pairs {
            let intent = intent.into();
            for phrase in phrases {
                set.add(intent.clone(), phrase);
            }
        }
        set
    }

    /// Append an example phrase for an intent.
    pub fn add<K: Into<String>, S: Into<String>>(&mut self, intent: K, phrase: S) {
        self.intents
            .entry(intent.into())
            .or_default()
            .push(phrase.into());
    }

    /// Example phrases for one intent. Missing intents have none.
    pub fn examples(&self, intent: &str) -> &[String] {
        self.intents.get(intent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate intents in lexicographic order with their phrases.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.intents
            .iter()
            .map(|(intent, phrases)| (intent.as_str(), phrases.as_slice()))
    }

    /// Intent names in lexicographic order.
    pub fn intents(&self) -> impl Iterator<Item = &str> {
        self.intents.keys().map(String::as_str)
    }

    /// Every phrase across all intents, in iteration order.
    pub fn phrases(&self) -> Vec<&str> {
        self.intents
            .values()
            .flat_map(|phrases| phrases.iter().map(String::as_str))
            .collect()
    }

    /// Total number of phrases.
    pub fn len(&self) -> usize {
        self.intents.values().map(Vec::len).sum()
    }

    /// True when the set has no phrases at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load an example set from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let set: ExampleSet = serde_json::from_str(&content).map_err(|e| {
            HalberdError::corpus(format!("failed to parse {}: {e}", path.display()))
        })?;
        log::debug!(
            "loaded {} examples for {} intents from {}",
            set.len(),
            set.intents.len(),
            path.display()
        );
        Ok(set)
    }

    /// Save the example set as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load the example set at `path`, writing the built-in defaults there
    /// first if the file does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        log::info!("writing default examples to {}", path.display());
        let set = Self::builtin();
        set.save(path)?;
        Ok(set)
    }

    /// The built-in example corpus.
    pub fn builtin() -> Self {
        Self::from_pairs([
            (
                KnownIntent::Reminder.as_str(),
                vec![
                    "remind me to call mom",
                    "remind me to buy milk tomorrow",
                    "set a reminder for the dentist appointment",
                    "don't let me forget to pay rent",
                    "alert me about the meeting at noon",
                    "ping me in an hour about the laundry",
                ],
            ),
            (
                KnownIntent::Note.as_str(),
                vec![
                    "take a note",
                    "take note of this",
                    "write down that the wifi password changed",
                    "jot down an idea for the blog",
                    "save a memo about the project",
                    "make a note that the car needs oil",
                ],
            ),
            (
                KnownIntent::Timer.as_str(),
                vec![
                    "set a timer for ten minutes",
                    "start a countdown",
                    "start a stopwatch",
                    "timer for thirty seconds",
                    "countdown from five minutes",
                    "set an alarm to go off in twenty minutes",
                ],
            ),
            (
                KnownIntent::Convert.as_str(),
                vec![
                    "convert five miles to kilometers",
                    "how many ounces in a pound",
                    "change celsius into fahrenheit",
                    "what is ten feet in meters",
                    "convert two cups to liters",
                    "how many grams are in a kilogram",
                ],
            ),
        ])
    }
}
