//! Semantic intent classifier using TF-IDF cosine similarity.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::command::CommandAnalyzer;
use crate::error::{HalberdError, Result};
use crate::intent::classifier::IntentClassifier;
use crate::intent::corpus::ExampleSet;
use crate::intent::tfidf::{TfIdfVectorizer, cosine_similarity};
use crate::intent::types::{IntentResult, clamp_confidence, validate_threshold};

/// Default minimum similarity for accepting the best match.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.6;

/// Semantic intent classifier.
///
/// Every example phrase is vectorized once at construction. A command is
/// labeled with the intent of its single most similar example, provided that
/// similarity reaches the acceptance threshold.
pub struct SemanticClassifier {
    /// TF-IDF vectorizer fitted on all example phrases.
    vectorizer: TfIdfVectorizer,
    /// Example vectors per intent, intents in lexicographic order.
    intent_examples: Vec<(String, Vec<Vec<f64>>)>,
    /// Minimum similarity for a labeled result.
    acceptance_threshold: RwLock<f64>,
}

impl std::fmt::Debug for SemanticClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticClassifier")
            .field("vectorizer", &self.vectorizer)
            .field("intents", &self.intent_examples.len())
            .field("acceptance_threshold", &self.acceptance_threshold())
            .finish()
    }
}

impl SemanticClassifier {
    /// Start building a semantic classifier.
    pub fn builder() -> SemanticClassifierBuilder {
        SemanticClassifierBuilder::default()
    }

    /// Create a classifier over the given examples with the command analyzer
    /// and the default acceptance threshold.
    pub fn new(examples: &ExampleSet) -> Result<Self> {
        Self::builder().examples(examples.clone()).build()
    }

    /// Current acceptance threshold.
    pub fn acceptance_threshold(&self) -> f64 {
        *self.acceptance_threshold.read()
    }

    /// Change the acceptance threshold. Values outside `[0.0, 1.0]` are
    /// rejected and leave the threshold unchanged.
    pub fn set_acceptance_threshold(&self, threshold: f64) -> Result<()> {
        let threshold = validate_threshold("acceptance threshold", threshold)?;
        *self.acceptance_threshold.write() = threshold;
        Ok(())
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Best matching intent and its similarity, ignoring the threshold.
    ///
    /// Returns `None` when no example has positive similarity. Ties keep the
    /// first maximum in intent order, then example order.
    pub fn best_match(&self, text: &str) -> Result<Option<(&str, f64)>> {
        let tokens = self.vectorizer.tokenize(text)?;
        if tokens.is_empty() {
            return Ok(None);
        }
        let query = self.vectorizer.transform_tokens(&tokens);

        let mut best: Option<(&str, f64)> = None;
        for (intent, vectors) in &self.intent_examples {
            for vector in vectors {
                let similarity = cosine_similarity(&query, vector);
                if similarity > best.map_or(0.0, |(_, score)| score) {
                    best = Some((intent.as_str(), similarity));
                }
            }
        }

        Ok(best)
    }
}

impl IntentClassifier for SemanticClassifier {
    fn classify(&self, text: &str) -> Result<IntentResult> {
        if text.trim().is_empty() {
            return Ok(IntentResult::unknown(0.0, text));
        }

        let threshold = self.acceptance_threshold();
        let result = match self.best_match(text)? {
            Some((intent, similarity)) => {
                let similarity = clamp_confidence(similarity);
                if similarity < threshold {
                    IntentResult::unknown(similarity, text)
                } else {
                    IntentResult::new(intent, similarity, text)
                }
            }
            None => IntentResult::unknown(0.0, text),
        };

        log::trace!(
            "semantic classifier: {:?} -> {} ({:.3}, threshold {:.2})",
            text,
            result.intent,
            result.confidence,
            threshold
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "semantic"
    }
}

/// Builder for [`SemanticClassifier`].
#[derive(Default)]
pub struct SemanticClassifierBuilder {
    examples: Option<ExampleSet>,
    analyzer: Option<Arc<dyn Analyzer>>,
    acceptance_threshold: Option<f64>,
}

impl SemanticClassifierBuilder {
    /// Set the example corpus. Required.
    pub fn examples(mut self, examples: ExampleSet) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Set the analyzer. Defaults to [`CommandAnalyzer`].
    pub fn analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Set the acceptance threshold. Defaults to
    /// [`DEFAULT_ACCEPTANCE_THRESHOLD`].
    pub fn acceptance_threshold(mut self, threshold: f64) -> Self {
        self.acceptance_threshold = Some(threshold);
        self
    }

    /// Fit the vectorizer and vectorize every example.
    pub fn build(self) -> Result<SemanticClassifier> {
        let examples = self.examples.ok_or_else(|| {
            HalberdError::missing_dependency("semantic classifier requires an example set")
        })?;
        let acceptance_threshold = validate_threshold(
            "acceptance threshold",
            self.acceptance_threshold
                .unwrap_or(DEFAULT_ACCEPTANCE_THRESHOLD),
        )?;
        let analyzer = match self.analyzer {
            Some(analyzer) => analyzer,
            None => Arc::new(CommandAnalyzer::new()?),
        };

        let vectorizer = TfIdfVectorizer::fit(analyzer, &examples.phrases())?;

        let mut intent_examples = Vec::new();
        for (intent, phrases) in examples.iter() {
            if phrases.is_empty() {
                continue;
            }
            let vectors = phrases
                .iter()
                .map(|phrase| vectorizer.transform(phrase))
                .collect::<Result<Vec<_>>>()?;
            intent_examples.push((intent.to_string(), vectors));
        }

        log::debug!(
            "semantic classifier: {} examples, {} intents, vocabulary {}",
            vectorizer.n_documents(),
            intent_examples.len(),
            vectorizer.vocabulary_size()
        );

        Ok(SemanticClassifier {
            vectorizer,
            intent_examples,
            acceptance_threshold: RwLock::new(acceptance_threshold),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(threshold: f64) -> SemanticClassifier {
        SemanticClassifier::builder()
            .examples(ExampleSet::builtin())
            .acceptance_threshold(threshold)
            .build()
            .unwrap()
    }

    #[test]
    fn test_exact_example_matches() {
        let result = classifier(0.55).classify("take note of this").unwrap();
        assert_eq!(result.intent, "note");
        assert!(result.confidence >= 0.99);
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn test_unrelated_text_is_unknown() {
        let result = classifier(0.55).classify("the weather is nice today").unwrap();
        assert_eq!(result.intent, "unknown");
        assert!(result.confidence < 0.55);
    }

    #[test]
    fn test_blank_text_is_unknown_at_any_threshold() {
        for threshold in [0.0, 0.3, 0.6, 1.0] {
            let classifier = classifier(threshold);
            for text in ["", "   ", "\t\n"] {
                let result = classifier.classify(text).unwrap();
                assert_eq!(result.intent, "unknown");
                assert_eq!(result.confidence, 0.0);
            }
        }
    }

    #[test]
    fn test_stop_words_only_is_unknown() {
        let result = classifier(0.0).classify("to the a of me").unwrap();
        assert!(result.is_unknown());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_below_threshold_keeps_similarity() {
        let classifier = classifier(1.0);
        let (_, similarity) = classifier
            .best_match("take a quick note about lunch")
            .unwrap()
            .unwrap();
        assert!(similarity < 1.0);

        let result = classifier.classify("take a quick note about lunch").unwrap();
        assert!(result.is_unknown());
        assert!((result.confidence - similarity).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let texts = [
            "take a quick note about lunch",
            "start the countdown now",
            "convert ten miles",
            "remind me tomorrow",
        ];
        let thresholds = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        let classifier = classifier(0.0);

        for text in texts {
            let mut labels = Vec::new();
            for threshold in thresholds {
                classifier.set_acceptance_threshold(threshold).unwrap();
                labels.push(classifier.classify(text).unwrap());
            }
            // Once a lower threshold yields unknown, every higher one does too.
            for pair in labels.windows(2) {
                if !pair[1].is_unknown() {
                    assert_eq!(pair[0].intent, pair[1].intent);
                }
            }
        }
    }

    #[test]
    fn test_set_threshold_validates() {
        let classifier = classifier(0.6);
        assert!(classifier.set_acceptance_threshold(1.2).is_err());
        assert!(classifier.set_acceptance_threshold(f64::NAN).is_err());
        assert_eq!(classifier.acceptance_threshold(), 0.6);
        classifier.set_acceptance_threshold(0.3).unwrap();
        assert_eq!(classifier.acceptance_threshold(), 0.3);
    }

    #[test]
    fn test_builder_requires_examples() {
        match SemanticClassifier::builder().build() {
            Err(HalberdError::MissingDependency(_)) => {}
            other => panic!("Expected missing dependency, got {other:?}"),
        }
        assert!(
            SemanticClassifier::builder()
                .examples(ExampleSet::builtin())
                .acceptance_threshold(-1.0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_empty_corpus_never_matches() {
        let classifier = SemanticClassifier::new(&ExampleSet::new()).unwrap();
        assert_eq!(classifier.vectorizer().vocabulary_size(), 0);
        let result = classifier.classify("take a note").unwrap();
        assert!(result.is_unknown());
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_tie_goes_to_first_intent_in_order() {
        let examples = ExampleSet::from_pairs([
            ("zulu", vec!["buy milk"]),
            ("alpha", vec!["buy milk"]),
        ]);
        let classifier = SemanticClassifier::builder()
            .examples(examples)
            .acceptance_threshold(0.5)
            .build()
            .unwrap();
        assert_eq!(classifier.classify("buy milk").unwrap().intent, "alpha");
    }

    #[test]
    fn test_classifier_is_shareable_across_threads() {
        let classifier = Arc::new(classifier(0.55));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let classifier = Arc::clone(&classifier);
                std::thread::spawn(move || classifier.classify("take note of this").unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().intent, "note");
        }
    }
}
