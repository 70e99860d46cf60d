//! Lowercase char filter.

use super::CharFilter;

/// Lowercases the whole input string with Unicode case mapping.
///
/// Runs before any pattern stripping so characters whose lowercase form is
/// ASCII (such as the Kelvin sign) survive normalization.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        input.to_lowercase()
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
