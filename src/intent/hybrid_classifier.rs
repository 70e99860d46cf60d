//! Hybrid classifier: a primary classifier backed by a fallback.
//!
//! The primary is trusted whenever it produces a label with enough
//! confidence. Only otherwise is the fallback consulted, and its answer
//! replaces the primary's only if it is labeled and strictly more confident.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{HalberdError, Result};
use crate::intent::classifier::IntentClassifier;
use crate::intent::types::{IntentResult, validate_threshold};

/// Default primary confidence below which the fallback is consulted.
pub const DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Hybrid intent classifier.
///
/// Both collaborators are plain [`IntentClassifier`]s, so a hybrid can nest
/// another hybrid on either side.
pub struct HybridClassifier {
    primary: Arc<dyn IntentClassifier>,
    fallback: Arc<dyn IntentClassifier>,
    primary_confidence_threshold: RwLock<f64>,
}

impl std::fmt::Debug for HybridClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridClassifier")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field(
                "primary_confidence_threshold",
                &self.primary_confidence_threshold(),
            )
            .finish()
    }
}

impl HybridClassifier {
    /// Start building a hybrid classifier.
    pub fn builder() -> HybridClassifierBuilder {
        HybridClassifierBuilder::default()
    }

    /// Create a hybrid with the default primary confidence threshold.
    pub fn new(primary: Arc<dyn IntentClassifier>, fallback: Arc<dyn IntentClassifier>) -> Self {
        Self {
            primary,
            fallback,
            primary_confidence_threshold: RwLock::new(DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD),
        }
    }

    /// Current primary confidence threshold.
    pub fn primary_confidence_threshold(&self) -> f64 {
        *self.primary_confidence_threshold.read()
    }

    /// Change the primary confidence threshold. Values outside `[0.0, 1.0]`
    /// are rejected and leave the threshold unchanged.
    pub fn set_primary_confidence_threshold(&self, threshold: f64) -> Result<()> {
        let threshold = validate_threshold("primary confidence threshold", threshold)?;
        *self.primary_confidence_threshold.write() = threshold;
        Ok(())
    }

    /// The primary classifier.
    pub fn primary(&self) -> &Arc<dyn IntentClassifier> {
        &self.primary
    }

    /// The fallback classifier.
    pub fn fallback(&self) -> &Arc<dyn IntentClassifier> {
        &self.fallback
    }
}

impl IntentClassifier for HybridClassifier {
    fn classify(&self, text: &str) -> Result<IntentResult> {
        let primary = self.primary.classify(text)?;
        let threshold = self.primary_confidence_threshold();

        if !primary.is_unknown() && primary.confidence >= threshold {
            log::trace!(
                "hybrid: trusting {} -> {} ({:.2})",
                self.primary.name(),
                primary.intent,
                primary.confidence
            );
            return Ok(primary);
        }

        let fallback = self.fallback.classify(text)?;
        // An unknown primary has nothing to defend.
        let effective = if primary.is_unknown() {
            0.0
        } else {
            primary.confidence
        };

        if !fallback.is_unknown() && fallback.confidence > effective {
            log::debug!(
                "hybrid: {} ({} {:.2}) overrides {} ({} {:.2})",
                self.fallback.name(),
                fallback.intent,
                fallback.confidence,
                self.primary.name(),
                primary.intent,
                primary.confidence
            );
            Ok(fallback)
        } else {
            log::trace!(
                "hybrid: keeping {} -> {} ({:.2})",
                self.primary.name(),
                primary.intent,
                primary.confidence
            );
            Ok(primary)
        }
    }

    fn name(&self) -> &str {
        "hybrid"
    }
}

/// Builder for [`HybridClassifier`].
#[derive(Default)]
pub struct HybridClassifierBuilder {
    primary: Option<Arc<dyn IntentClassifier>>,
    fallback: Option<Arc<dyn IntentClassifier>>,
    primary_confidence_threshold: Option<f64>,
}

impl HybridClassifierBuilder {
    /// Set the primary classifier. Required.
    pub fn primary(mut self, primary: Arc<dyn IntentClassifier>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Set the fallback classifier. Required.
    pub fn fallback(mut self, fallback: Arc<dyn IntentClassifier>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Set the primary confidence threshold. Defaults to
    /// [`DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD`].
    pub fn primary_confidence_threshold(mut self, threshold: f64) -> Self {
        self.primary_confidence_threshold = Some(threshold);
        self
    }

    /// Build the hybrid classifier.
    pub fn build(self) -> Result<HybridClassifier> {
        let primary = self.primary.ok_or_else(|| {
            HalberdError::missing_dependency("hybrid classifier requires a primary classifier")
        })?;
        let fallback = self.fallback.ok_or_else(|| {
            HalberdError::missing_dependency("hybrid classifier requires a fallback classifier")
        })?;
        let threshold = validate_threshold(
            "primary confidence threshold",
            self.primary_confidence_threshold
                .unwrap_or(DEFAULT_PRIMARY_CONFIDENCE_THRESHOLD),
        )?;

        Ok(HybridClassifier {
            primary,
            fallback,
            primary_confidence_threshold: RwLock::new(threshold),
        })
    }
}
