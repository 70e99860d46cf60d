//! Command analyzer: the normalizer shared by the semantic classifier.
//!
//! Processing steps:
//! 1. Lowercase the whole string
//! 2. Replace anything outside `[a-z0-9\s]` with a space
//! 3. Split on whitespace
//! 4. Drop tokens of one character or less
//! 5. Drop command stop words
//!
//! Token order follows the input, which term-frequency counting relies on.
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::analyzer::Analyzer;
//! use halberd::analysis::analyzer::command::CommandAnalyzer;
//!
//! let analyzer = CommandAnalyzer::new().unwrap();
//! assert_eq!(
//!     analyzer.terms("Set a timer for 10 minutes.").unwrap(),
//!     vec!["set", "timer", "10", "minutes"]
//! );
//! assert!(analyzer.terms("   ").unwrap().is_empty());
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::length::LengthFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Analyzer for short natural-language commands.
#[derive(Clone, Debug)]
pub struct CommandAnalyzer {
    inner: PipelineAnalyzer,
}

impl CommandAnalyzer {
    /// Create a command analyzer with the default command stop words.
    pub fn new() -> Result<Self> {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create a command analyzer with a custom stop filter.
    pub fn with_stop_filter(stop_filter: StopFilter) -> Result<Self> {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::non_alphanumeric()?))
            .add_filter(Arc::new(LengthFilter::new(2)))
            .add_filter(Arc::new(stop_filter))
            .with_name("command");

        Ok(Self { inner })
    }

    /// Get the underlying pipeline.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for CommandAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
