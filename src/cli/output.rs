//! Output formatting for CLI commands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cli::args::{HalberdArgs, OutputFormat};
use crate::error::Result;
use crate::intent::types::IntentResult;

/// Result of the `run` command for one input line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    #[serde(flatten)]
    pub result: IntentResult,
    /// Handler description, absent for unknown intents.
    pub action: Option<String>,
}

/// Result of the `classify` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationOutput {
    pub classifier: String,
    #[serde(flatten)]
    pub result: IntentResult,
}

/// Result of the `batch` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    pub results: Vec<RunResult>,
    pub total: usize,
    pub unknown: usize,
    pub duration_ms: u64,
}

/// Result of the `examples` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamplesSummary {
    /// Corpus file, or `None` for the built-in examples.
    pub path: Option<String>,
    /// Phrase count per intent.
    pub intents: BTreeMap<String, usize>,
    pub total: usize,
    /// Every phrase, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<BTreeMap<String, Vec<String>>>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self, verbosity: u8) -> String;
}

impl HumanOutput for RunResult {
    fn render_human(&self, verbosity: u8) -> String {
        let mut lines = vec![format_intent_line(&self.result)];
        match &self.action {
            Some(action) => lines.push(format!("  {action}")),
            None => lines.push("  (no action for this command)".to_string()),
        }
        if verbosity > 1 {
            lines.extend(format_entities(&self.result));
        }
        lines.join("\n")
    }
}

impl HumanOutput for ClassificationOutput {
    fn render_human(&self, verbosity: u8) -> String {
        let line = format_intent_line(&self.result);
        if verbosity > 1 {
            format!("{line}  [{}]", self.classifier)
        } else {
            line
        }
    }
}

impl HumanOutput for BatchResults {
    fn render_human(&self, verbosity: u8) -> String {
        let mut lines: Vec<String> = self
            .results
            .iter()
            .map(|result| result.render_human(verbosity))
            .collect();
        if verbosity > 0 {
            lines.push(String::new());
            lines.push(format!(
                "{} commands, {} unknown, {} ms",
                self.total, self.unknown, self.duration_ms
            ));
        }
        lines.join("\n")
    }
}

impl HumanOutput for ExamplesSummary {
    fn render_human(&self, _verbosity: u8) -> String {
        let mut lines = vec![format!(
            "Examples: {}",
            self.path.as_deref().unwrap_or("(built-in)")
        )];
        for (intent, count) in &self.intents {
            lines.push(format!("  {intent}: {count}"));
            if let Some(phrases) = self.phrases.as_ref().and_then(|p| p.get(intent)) {
                for phrase in phrases {
                    lines.push(format!("    - {phrase}"));
                }
            }
        }
        lines.push(format!("Total: {}", self.total));
        lines.join("\n")
    }
}

fn format_intent_line(result: &IntentResult) -> String {
    format!(
        "{:<8} {:.3}  {}",
        result.intent, result.confidence, result.raw_text
    )
}

fn format_entities(result: &IntentResult) -> Vec<String> {
    result
        .entities
        .iter()
        .map(|(kind, value)| format!("  {kind}: {value}"))
        .collect()
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &HalberdArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", result.render_human(args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HalberdArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn run_result() -> RunResult {
        let mut result = IntentResult::new("note", 0.7, "take a note buy milk");
        result.set_entity("text", json!("buy milk"));
        RunResult {
            result,
            action: Some("Note: \"buy milk\"".to_string()),
        }
    }

    #[test]
    fn test_run_result_json_is_flat() {
        let value = serde_json::to_value(run_result()).unwrap();
        assert_eq!(value["intent"], "note");
        assert_eq!(value["entities"]["text"], "buy milk");
        assert_eq!(value["action"], "Note: \"buy milk\"");
    }

    #[test]
    fn test_run_result_human() {
        let text = run_result().render_human(1);
        assert!(text.starts_with("note     0.700  take a note buy milk"));
        assert!(text.contains("Note: \"buy milk\""));
        assert!(!text.contains("text:"));
        assert!(run_result().render_human(2).contains("text: \"buy milk\""));
    }

    #[test]
    fn test_batch_summary_line() {
        let batch = BatchResults {
            results: vec![run_result()],
            total: 1,
            unknown: 0,
            duration_ms: 3,
        };
        assert!(batch.render_human(1).ends_with("1 commands, 0 unknown, 3 ms"));
        assert!(!batch.render_human(0).contains("unknown,"));
    }

    #[test]
    fn test_examples_summary_skips_missing_phrases() {
        let summary = ExamplesSummary {
            path: None,
            intents: BTreeMap::from([("note".to_string(), 2)]),
            total: 2,
            phrases: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("phrases").is_none());
        assert!(summary.render_human(1).contains("(built-in)"));
    }
}
