//! Length filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops tokens shorter than a minimum character count.
///
/// The command analyzer uses a minimum of 2, which removes stray single
/// letters left behind by punctuation stripping ("don't" → "don", "t").
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min_chars: usize,
}

impl LengthFilter {
    /// Create a filter that keeps tokens with at least `min_chars` characters.
    pub fn new(min_chars: usize) -> Self {
        LengthFilter { min_chars }
    }

    /// Minimum number of characters a token must have to be kept.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| token.char_len() >= self.min_chars)
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter() {
        let filter = LengthFilter::default();
        let tokens = vec![
            Token::new("don", 0),
            Token::new("t", 1),
            Token::new("10", 2),
            Token::new("5", 3),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "don");
        assert_eq!(result[1].text, "10");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LengthFilter::new(3).name(), "length");
        assert_eq!(LengthFilter::new(3).min_chars(), 3);
    }
}
