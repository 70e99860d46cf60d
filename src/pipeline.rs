//! Classification followed by entity extraction.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use halberd::extraction::rule_based::RuleBasedExtractor;
//! use halberd::intent::keyword_classifier::KeywordClassifier;
//! use halberd::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::builder()
//!     .classifier(Arc::new(KeywordClassifier::default()))
//!     .extractor(Arc::new(RuleBasedExtractor::new()))
//!     .build()
//!     .unwrap();
//!
//! let result = pipeline.process("remind me to call mom").unwrap();
//! assert_eq!(result.intent, "reminder");
//! assert_eq!(result.entity("text").unwrap(), "call mom");
//! ```

use std::sync::Arc;

use crate::error::{HalberdError, Result};
use crate::extraction::EntityExtractor;
use crate::intent::classifier::IntentClassifier;
use crate::intent::types::IntentResult;

/// One classifier and one extractor, applied in that order.
#[derive(Clone)]
pub struct Pipeline {
    classifier: Arc<dyn IntentClassifier>,
    extractor: Arc<dyn EntityExtractor>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("classifier", &self.classifier.name())
            .field("extractor", &self.extractor.name())
            .finish()
    }
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Classify `text` and annotate the result with its entities.
    pub fn process(&self, text: &str) -> Result<IntentResult> {
        let mut result = self.classifier.classify(text)?;
        self.extractor.extract(text, &mut result);

        log::debug!(
            "{} -> {} ({:.2})",
            text,
            result.intent,
            result.confidence
        );

        Ok(result)
    }

    /// The classifier.
    pub fn classifier(&self) -> &Arc<dyn IntentClassifier> {
        &self.classifier
    }

    /// The extractor.
    pub fn extractor(&self) -> &Arc<dyn EntityExtractor> {
        &self.extractor
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    classifier: Option<Arc<dyn IntentClassifier>>,
    extractor: Option<Arc<dyn EntityExtractor>>,
}

impl PipelineBuilder {
    /// Set the classifier. Required.
    pub fn classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Set the entity extractor. Required.
    pub fn extractor(mut self, extractor: Arc<dyn EntityExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let classifier = self
            .classifier
            .ok_or_else(|| HalberdError::missing_dependency("pipeline requires a classifier"))?;
        let extractor = self
            .extractor
            .ok_or_else(|| HalberdError::missing_dependency("pipeline requires an entity extractor"))?;

        Ok(Pipeline {
            classifier,
            extractor,
        })
    }
}
