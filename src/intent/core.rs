//! Helper functions for creating intent classifiers.

use std::sync::Arc;

use crate::config::{ClassifierStrategy, HalberdConfig};
use crate::error::Result;
use crate::intent::classifier::IntentClassifier;
use crate::intent::corpus::ExampleSet;
use crate::intent::hybrid_classifier::HybridClassifier;
use crate::intent::keyword_classifier::{KeywordClassifier, KeywordTable};
use crate::intent::semantic_classifier::SemanticClassifier;

/// Load the example corpus a config asks for.
///
/// With an `examples_path` the file is loaded, or created with the built-in
/// examples on first run. Without one the built-in examples are used.
pub fn load_examples(config: &HalberdConfig) -> Result<ExampleSet> {
    match &config.examples_path {
        Some(path) => ExampleSet::load_or_init(path),
        None => Ok(ExampleSet::builtin()),
    }
}

/// Create a new keyword-based intent classifier.
pub fn new_keyword_based(table: KeywordTable) -> Arc<dyn IntentClassifier> {
    Arc::new(KeywordClassifier::new(table))
}

/// Create a new semantic intent classifier.
pub fn new_semantic(examples: ExampleSet, acceptance_threshold: f64) -> Result<Arc<dyn IntentClassifier>> {
    Ok(Arc::new(
        SemanticClassifier::builder()
            .examples(examples)
            .acceptance_threshold(acceptance_threshold)
            .build()?,
    ))
}

/// Create a keyword classifier backed by a semantic fallback.
pub fn new_hybrid(
    table: KeywordTable,
    examples: ExampleSet,
    acceptance_threshold: f64,
    primary_confidence_threshold: f64,
) -> Result<Arc<dyn IntentClassifier>> {
    Ok(Arc::new(
        HybridClassifier::builder()
            .primary(new_keyword_based(table))
            .fallback(new_semantic(examples, acceptance_threshold)?)
            .primary_confidence_threshold(primary_confidence_threshold)
            .build()?,
    ))
}

/// Create the classifier a config describes, from an already loaded corpus.
pub fn from_config(config: &HalberdConfig, examples: ExampleSet) -> Result<Arc<dyn IntentClassifier>> {
    config.validate()?;
    log::debug!("building {} classifier", config.strategy);

    match config.strategy {
        ClassifierStrategy::Keyword => Ok(new_keyword_based(config.keyword_table())),
        ClassifierStrategy::Semantic => new_semantic(examples, config.acceptance_threshold),
        ClassifierStrategy::Hybrid => new_hybrid(
            config.keyword_table(),
            examples,
            config.acceptance_threshold,
            config.primary_confidence_threshold,
        ),
    }
}
