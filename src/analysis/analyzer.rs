//! Analyzers that turn raw command text into normalized terms.
//!
//! An analyzer owns a complete pipeline (char filters, tokenizer, token
//! filters). Classifiers hold an `Arc<dyn Analyzer>` so tests and callers
//! can substitute their own normalization.
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::analyzer::Analyzer;
//! use halberd::analysis::analyzer::command::CommandAnalyzer;
//!
//! let analyzer = CommandAnalyzer::new().unwrap();
//! let terms = analyzer.terms("Remind me to call Mom!").unwrap();
//! assert_eq!(terms, vec!["remind", "call", "mom"]);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// # Thread Safety
///
/// The trait requires `Send + Sync` so one analyzer can back a classifier
/// that is shared across threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the text and collect the surviving token texts, in input order.
    ///
    /// Tokens marked as stopped are skipped.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped())
            .map(|token| token.text)
            .collect())
    }
}

pub mod command;
pub mod pipeline;
