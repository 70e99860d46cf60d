//! Configuration for building a classification pipeline.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "strategy": "hybrid",
//!   "acceptance_threshold": 0.55,
//!   "examples_path": "examples.json"
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HalberdError, Result};
use crate::intent::hybrid_classifier::DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD;
use crate::intent::keyword_classifier::KeywordTable;
use crate::intent::semantic_classifier::DEFAULT_ACCEPTANCE_THRESHOLD;
use crate::intent::types::validate_threshold;

/// Which classifier a pipeline uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierStrategy {
    /// Keyword matching only.
    Keyword,
    /// TF-IDF similarity against the example corpus only.
    Semantic,
    /// Keyword matching with semantic fallback.
    #[default]
    Hybrid,
}

impl ClassifierStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierStrategy::Keyword => "keyword",
            ClassifierStrategy::Semantic => "semantic",
            ClassifierStrategy::Hybrid => "hybrid",
        }
    }

    /// True when the strategy needs the example corpus.
    pub fn uses_examples(&self) -> bool {
        !matches!(self, ClassifierStrategy::Keyword)
    }
}

impl fmt::Display for ClassifierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassifierStrategy {
    type Err = HalberdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(ClassifierStrategy::Keyword),
            "semantic" => Ok(ClassifierStrategy::Semantic),
            "hybrid" => Ok(ClassifierStrategy::Hybrid),
            other => Err(HalberdError::invalid_config(format!(
                "unknown classifier strategy: {other}"
            ))),
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalberdConfig {
    /// Classifier strategy.
    pub strategy: ClassifierStrategy,
    /// Minimum similarity for a semantic match.
    pub acceptance_threshold: f64,
    /// Keyword confidence below which the hybrid consults the semantic side.
    pub primary_confidence_threshold: f64,
    /// Example corpus file. Written with the built-in examples when missing.
    /// Without a path the built-in examples are used in memory.
    pub examples_path: Option<PathBuf>,
    /// Keyword table replacing the built-in one.
    pub keywords: Option<KeywordTable>,
}

impl Default for HalberdConfig {
    fn default() -> Self {
        Self {
            strategy: ClassifierStrategy::default(),
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            primary_confidence_threshold: DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD,
            examples_path: None,
            keywords: None,
        }
    }
}

impl HalberdConfig {
    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: HalberdConfig = serde_json::from_str(&content).map_err(|e| {
            HalberdError::invalid_config(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check thresholds and the keyword table.
    pub fn validate(&self) -> Result<()> {
        validate_threshold("acceptance_threshold", self.acceptance_threshold)
            .map_err(|e| HalberdError::invalid_config(e.to_string()))?;
        validate_threshold(
            "primary_confidence_threshold",
            self.primary_confidence_threshold,
        )
        .map_err(|e| HalberdError::invalid_config(e.to_string()))?;

        if let Some(keywords) = &self.keywords {
            if keywords.is_empty() {
                return Err(HalberdError::invalid_config(
                    "keyword table override must not be empty",
                ));
            }
            if let Some(entry) = keywords.entries().iter().find(|e| e.intent.trim().is_empty()) {
                return Err(HalberdError::invalid_config(format!(
                    "keyword {:?} has no intent",
                    entry.keyword
                )));
            }
        }

        Ok(())
    }

    /// The keyword table in effect.
    pub fn keyword_table(&self) -> KeywordTable {
        self.keywords.clone().unwrap_or_default()
    }
}
