//! Command line argument parsing for the Halberd CLI using clap.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierStrategy;

/// Halberd - intent classification and entity extraction for short commands
#[derive(Parser, Debug, Clone)]
#[command(name = "halberd")]
#[command(about = "Classify short natural-language commands and extract their entities")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HalberdArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HALBERD_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Example corpus file, created with the built-in examples if missing
    #[arg(short, long, value_name = "EXAMPLES_FILE", env = "HALBERD_EXAMPLES", global = true)]
    pub examples: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HalberdArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a command, extract its entities and dispatch it
    Run(RunArgs),

    /// Classify a command without extracting entities
    Classify(ClassifyArgs),

    /// Process many commands, one per line
    Batch(BatchArgs),

    /// Manage the example corpus
    Examples(ExamplesArgs),
}

/// Classifier selection and thresholds, overriding the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifierOptions {
    /// Classifier to use
    #[arg(long = "classifier", value_name = "KIND")]
    pub classifier: Option<ClassifierKind>,

    /// Minimum similarity for a semantic match (0.0-1.0)
    #[arg(long, value_name = "THRESHOLD")]
    pub acceptance_threshold: Option<f64>,

    /// Keyword confidence below which the semantic classifier is consulted (0.0-1.0)
    #[arg(long, value_name = "THRESHOLD")]
    pub primary_threshold: Option<f64>,
}

/// Arguments for running a single command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Command text; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    #[command(flatten)]
    pub classifier: ClassifierOptions,

    /// Reference time for relative dates (e.g. 2025-03-14T09:00:00); defaults to now
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<NaiveDateTime>,
}

impl RunArgs {
    /// The command text as one string.
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for classifying a single command
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Command text; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    #[command(flatten)]
    pub classifier: ClassifierOptions,
}

impl ClassifyArgs {
    /// The command text as one string.
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

/// Arguments for batch processing
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// Input file with one command per line (reads stdin when omitted)
    #[arg(value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub classifier: ClassifierOptions,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Reference time for relative dates (e.g. 2025-03-14T09:00:00); defaults to now
    #[arg(long, value_name = "DATETIME")]
    pub now: Option<NaiveDateTime>,
}

/// Arguments for the example corpus
#[derive(Parser, Debug, Clone)]
pub struct ExamplesArgs {
    #[command(subcommand)]
    pub action: ExamplesAction,
}

/// Example corpus actions
#[derive(Subcommand, Debug, Clone)]
pub enum ExamplesAction {
    /// Write the built-in examples to a file
    Init {
        /// Destination file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the examples in use
    Show {
        /// Print every phrase, not just the counts
        #[arg(short, long)]
        long: bool,
    },
}

/// Classifier kinds selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    /// Keyword matching only
    Keyword,
    /// TF-IDF similarity against the examples only
    Semantic,
    /// Keyword matching with semantic fallback
    Hybrid,
}

impl From<ClassifierKind> for ClassifierStrategy {
    fn from(kind: ClassifierKind) -> Self {
        match kind {
            ClassifierKind::Keyword => ClassifierStrategy::Keyword,
            ClassifierKind::Semantic => ClassifierStrategy::Semantic,
            ClassifierKind::Hybrid => ClassifierStrategy::Hybrid,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_run_command() {
        let args = HalberdArgs::try_parse_from([
            "halberd",
            "run",
            "remind",
            "me",
            "to",
            "call",
            "mom",
            "--classifier",
            "keyword",
        ])
        .unwrap();

        if let Command::Run(run_args) = args.command {
            assert_eq!(run_args.joined_text(), "remind me to call mom");
            assert_eq!(run_args.classifier.classifier, Some(ClassifierKind::Keyword));
            assert!(run_args.now.is_none());
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_run_with_reference_time() {
        let args = HalberdArgs::try_parse_from([
            "halberd",
            "run",
            "remind me tomorrow",
            "--now",
            "2025-03-14T09:00:00",
        ])
        .unwrap();

        if let Command::Run(run_args) = args.command {
            let now = run_args.now.unwrap();
            assert_eq!(now.to_string(), "2025-03-14 09:00:00");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_classify_command_thresholds() {
        let args = HalberdArgs::try_parse_from([
            "halberd",
            "classify",
            "take note of this",
            "--classifier",
            "semantic",
            "--acceptance-threshold",
            "0.55",
        ])
        .unwrap();

        if let Command::Classify(classify_args) = args.command {
            assert_eq!(classify_args.joined_text(), "take note of this");
            assert_eq!(
                classify_args.classifier.classifier,
                Some(ClassifierKind::Semantic)
            );
            assert_eq!(classify_args.classifier.acceptance_threshold, Some(0.55));
            assert_eq!(classify_args.classifier.primary_threshold, None);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_batch_command() {
        let args =
            HalberdArgs::try_parse_from(["halberd", "batch", "commands.txt", "--threads", "4"])
                .unwrap();

        if let Command::Batch(batch_args) = args.command {
            assert_eq!(batch_args.input, Some(PathBuf::from("commands.txt")));
            assert_eq!(batch_args.threads, Some(4));
        } else {
            panic!("Expected Batch command");
        }
    }

    #[test]
    fn test_examples_init_command() {
        let args =
            HalberdArgs::try_parse_from(["halberd", "examples", "init", "ex.json", "--force"])
                .unwrap();

        match args.command {
            Command::Examples(ExamplesArgs {
                action: ExamplesAction::Init { path, force },
            }) => {
                assert_eq!(path, PathBuf::from("ex.json"));
                assert!(force);
            }
            _ => panic!("Expected Examples Init command"),
        }
    }

    #[test]
    fn test_global_options() {
        let args = HalberdArgs::try_parse_from([
            "halberd",
            "-vv",
            "--format",
            "json",
            "--pretty",
            "classify",
            "start a stopwatch",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }

    #[test]
    fn test_quiet_mode() {
        let args =
            HalberdArgs::try_parse_from(["halberd", "-q", "-vvv", "classify", "hello"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = HalberdArgs::try_parse_from(["halberd", "classify", "hello"]).unwrap();
        assert_eq!(args.verbosity(), 1);
    }

    #[test]
    fn test_run_requires_text() {
        assert!(HalberdArgs::try_parse_from(["halberd", "run"]).is_err());
    }

    #[test]
    fn test_invalid_classifier_kind() {
        assert!(
            HalberdArgs::try_parse_from(["halberd", "classify", "hi", "--classifier", "neural"])
                .is_err()
        );
    }
}
