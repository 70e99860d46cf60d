//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing stage of the pipeline: they
//! split (already char-filtered) text into [`Token`](crate::analysis::token::Token)s.
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::tokenizer::Tokenizer;
//! use halberd::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("set  timer").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers built on it can be shared
/// by classifiers serving concurrent callers.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;
