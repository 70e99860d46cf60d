//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and return a new
//! stream. They are chained by an analyzer:
//!
//! ```text
//! Tokenizer → Length → Stop Words → tokens
//! ```
//!
//! # Examples
//!
//! ```
//! use halberd::analysis::token::Token;
//! use halberd::analysis::token_filter::Filter;
//! use halberd::analysis::token_filter::stop::StopFilter;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![Token::new("remind", 0), Token::new("me", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].text, "remind");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod length;
pub mod stop;
