//! Intent classifier trait definition.

use crate::error::Result;
use crate::intent::types::IntentResult;

/// Intent classifier trait.
///
/// Keyword, semantic and hybrid classifiers all implement this trait, so any
/// of them can serve as the primary or the fallback of a
/// [`HybridClassifier`](crate::intent::hybrid_classifier::HybridClassifier),
/// including another hybrid.
pub trait IntentClassifier: Send + Sync {
    /// Classify a command.
    ///
    /// Blank or nonsensical text is not an error: it yields an `unknown`
    /// result with confidence 0.0.
    fn classify(&self, text: &str) -> Result<IntentResult>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
