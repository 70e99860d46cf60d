//! Error types for the Halberd library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`HalberdError`] enum. The classification core only fails on contract
//! violations (a required dependency that was never supplied, an invalid
//! threshold); malformed or adversarial command text is never an error.
//!
//! # Examples
//!
//! ```
//! use halberd::error::{HalberdError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(HalberdError::invalid_argument("threshold must be finite"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Halberd operations.
#[derive(Error, Debug)]
pub enum HalberdError {
    /// I/O errors (corpus and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid or inconsistent configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Example corpus errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// A required collaborator was not supplied at construction time
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with HalberdError.
pub type Result<T> = std::result::Result<T, HalberdError>;

impl HalberdError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        HalberdError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HalberdError::Config(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        HalberdError::Corpus(msg.into())
    }

    /// Create a new missing dependency error.
    pub fn missing_dependency<S: Into<String>>(msg: S) -> Self {
        HalberdError::MissingDependency(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        HalberdError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = HalberdError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");

        let error = HalberdError::missing_dependency("primary classifier");
        assert_eq!(error.to_string(), "Missing dependency: primary classifier");

        let error = HalberdError::invalid_config("threshold out of range");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: threshold out of range"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let halberd_error = HalberdError::from(io_error);

        match halberd_error {
            HalberdError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
