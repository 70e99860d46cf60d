//! Char filter implementations for text normalization.
//!
//! Char filters rewrite the raw string before it reaches the tokenizer. They
//! run in the order they were added to the analyzer, so case folding can be
//! applied before pattern-based stripping.
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::char_filter::CharFilter;
//! use halberd::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Set TIMER"), "set timer");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the rewritten text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod pattern_replace;
