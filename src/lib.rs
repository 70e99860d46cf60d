//! # Halberd
//!
//! Intent classification and entity extraction for short natural-language
//! commands such as "remind me to call mom tomorrow" or "convert 5 km to
//! miles".
//!
//! ## Features
//!
//! - Keyword classifier with an injectable keyword table
//! - TF-IDF cosine-similarity classifier trained from labeled examples
//! - Hybrid classifier with a confidence-threshold fallback policy
//! - Rule-based extraction of dates, numbers, units and free text
//! - Composable text analysis pipeline
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use halberd::config::HalberdConfig;
//! use halberd::extraction::rule_based::RuleBasedExtractor;
//! use halberd::intent::core::from_config;
//! use halberd::intent::corpus::ExampleSet;
//! use halberd::pipeline::Pipeline;
//!
//! let classifier = from_config(&HalberdConfig::default(), ExampleSet::builtin()).unwrap();
//! let pipeline = Pipeline::builder()
//!     .classifier(classifier)
//!     .extractor(Arc::new(RuleBasedExtractor::new()))
//!     .build()
//!     .unwrap();
//!
//! let result = pipeline.process("convert 5 km to miles").unwrap();
//! assert_eq!(result.intent, "convert");
//! assert_eq!(result.entity("units").unwrap()["target"], "mile");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod intent;
pub mod pipeline;

pub mod prelude {
    pub use crate::config::{ClassifierStrategy, HalberdConfig};
    pub use crate::error::{HalberdError, Result};
    pub use crate::extraction::EntityExtractor;
    pub use crate::extraction::rule_based::RuleBasedExtractor;
    pub use crate::intent::classifier::IntentClassifier;
    pub use crate::intent::corpus::ExampleSet;
    pub use crate::intent::hybrid_classifier::HybridClassifier;
    pub use crate::intent::keyword_classifier::{KeywordClassifier, KeywordTable};
    pub use crate::intent::semantic_classifier::SemanticClassifier;
    pub use crate::intent::types::{IntentResult, KnownIntent};
    pub use crate::pipeline::Pipeline;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
