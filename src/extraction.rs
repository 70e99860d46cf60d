//! Entity extraction for classified commands.
//!
//! An [`EntityExtractor`] annotates an [`IntentResult`] with structured
//! information found in the command text. Extraction never fails outward: a
//! sub-extraction that cannot make sense of its input reports
//! [`Extraction::Failed`], which is logged and leaves its key absent.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use halberd::extraction::EntityExtractor;
//! use halberd::extraction::rule_based::RuleBasedExtractor;
//! use halberd::intent::types::IntentResult;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 3, 14)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let extractor = RuleBasedExtractor::new().with_reference_time(now);
//!
//! let mut result = IntentResult::new("timer", 0.95, "set a timer for 10 minutes");
//! extractor.extract("set a timer for 10 minutes", &mut result);
//!
//! assert_eq!(result.entity("number").unwrap()[0], 10.0);
//! assert_eq!(result.entity("text").unwrap(), "10 minutes");
//! ```

use std::fmt;

use crate::intent::types::IntentResult;

pub mod datetime;
pub mod number;
pub mod rule_based;
pub mod text;
pub mod units;

/// Capability that adds entities to a classification result.
pub trait EntityExtractor: Send + Sync {
    /// Add entities found in `text` to `result`.
    ///
    /// Afterwards `result` always carries a `text` entity, which defaults to
    /// the raw input.
    fn extract(&self, text: &str, result: &mut IntentResult);

    /// Get the name of this extractor for debugging and logging.
    fn name(&self) -> &str;
}

/// Entity keys written by extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    DateTime,
    Number,
    Units,
    Text,
}

impl EntityKind {
    /// All entity kinds in extraction order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::DateTime,
        EntityKind::Number,
        EntityKind::Units,
        EntityKind::Text,
    ];

    /// Key under which the entity is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::DateTime => "datetime",
            EntityKind::Number => "number",
            EntityKind::Units => "units",
            EntityKind::Text => "text",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sub-extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    /// The entity was found.
    Found(T),
    /// The text does not mention this kind of entity.
    Missing,
    /// The text mentions the entity but it could not be interpreted.
    Failed(String),
}

impl<T> Extraction<T> {
    /// Build a failure from any displayable reason.
    pub fn failed<S: fmt::Display>(reason: S) -> Self {
        Extraction::Failed(reason.to_string())
    }

    /// True for [`Extraction::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    /// Transform the found value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Extraction<U> {
        match self {
            Extraction::Found(value) => Extraction::Found(f(value)),
            Extraction::Missing => Extraction::Missing,
            Extraction::Failed(reason) => Extraction::Failed(reason),
        }
    }

    /// The found value, if any.
    pub fn found(self) -> Option<T> {
        match self {
            Extraction::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Extraction<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Extraction::Found(value),
            None => Extraction::Missing,
        }
    }
}
