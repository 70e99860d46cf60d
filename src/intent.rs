//! Intent classification for short commands.
//!
//! Two classifiers do the work and a third arbitrates:
//!
//! - [`KeywordClassifier`](keyword_classifier::KeywordClassifier) counts
//!   literal keyword hits from a [`KeywordTable`](keyword_classifier::KeywordTable).
//! - [`SemanticClassifier`](semantic_classifier::SemanticClassifier) finds the
//!   most similar labeled example by TF-IDF cosine similarity.
//! - [`HybridClassifier`](hybrid_classifier::HybridClassifier) trusts a
//!   primary classifier and consults a fallback only when the primary is
//!   unsure.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use halberd::intent::classifier::IntentClassifier;
//! use halberd::intent::corpus::ExampleSet;
//! use halberd::intent::hybrid_classifier::HybridClassifier;
//! use halberd::intent::keyword_classifier::KeywordClassifier;
//! use halberd::intent::semantic_classifier::SemanticClassifier;
//!
//! let semantic = SemanticClassifier::new(&ExampleSet::builtin()).unwrap();
//! let classifier = HybridClassifier::builder()
//!     .primary(Arc::new(KeywordClassifier::default()))
//!     .fallback(Arc::new(semantic))
//!     .build()
//!     .unwrap();
//!
//! let result = classifier.classify("set timer for 10 minutes").unwrap();
//! assert_eq!(result.intent, "timer");
//! ```

pub mod classifier;
pub mod core;
pub mod corpus;
pub mod hybrid_classifier;
pub mod keyword_classifier;
pub mod semantic_classifier;
pub mod tfidf;
pub mod types;

pub use classifier::IntentClassifier;
pub use types::{IntentResult, KnownIntent, UNKNOWN_INTENT};
