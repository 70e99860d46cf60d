//! Command Line Interface for Halberd.

pub mod args;
pub mod commands;
pub mod handlers;
pub mod output;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
