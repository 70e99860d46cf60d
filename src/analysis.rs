//! Text analysis for command normalization.
//!
//! Command text flows through char filters, a tokenizer and token filters
//! before it reaches the vector space model:
//!
//! ```text
//! raw text → Lowercase → PatternReplace → Whitespace → Length → Stop → tokens
//! ```
//!
//! [`analyzer::command::CommandAnalyzer`] assembles that chain with the
//! command stop-word list.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
