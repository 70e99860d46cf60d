//! Command implementations for the Halberd CLI.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDateTime;
use rayon::prelude::*;

use crate::cli::args::*;
use crate::cli::handlers::HandlerRegistry;
use crate::cli::output::*;
use crate::config::HalberdConfig;
use crate::error::{HalberdError, Result};
use crate::extraction::rule_based::RuleBasedExtractor;
use crate::intent::core::{from_config, load_examples};
use crate::intent::corpus::ExampleSet;
use crate::pipeline::Pipeline;

/// Execute a CLI command.
pub fn execute_command(args: HalberdArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => run_command(run_args, &args),
        Command::Classify(classify_args) => classify_command(classify_args, &args),
        Command::Batch(batch_args) => batch_command(batch_args, &args),
        Command::Examples(examples_args) => examples_command(examples_args, &args),
    }
}

/// Build the effective configuration: config file, then global flags, then
/// per-command classifier options.
pub fn resolve_config(cli_args: &HalberdArgs, options: &ClassifierOptions) -> Result<HalberdConfig> {
    let mut config = match &cli_args.config {
        Some(path) => HalberdConfig::load(path)?,
        None => HalberdConfig::default(),
    };

    if let Some(examples) = &cli_args.examples {
        config.examples_path = Some(examples.clone());
    }
    if let Some(kind) = options.classifier {
        config.strategy = kind.into();
    }
    if let Some(threshold) = options.acceptance_threshold {
        config.acceptance_threshold = threshold;
    }
    if let Some(threshold) = options.primary_threshold {
        config.primary_confidence_threshold = threshold;
    }

    config.validate()?;
    Ok(config)
}

/// Build a pipeline for the given configuration.
pub fn build_pipeline(config: &HalberdConfig, now: Option<NaiveDateTime>) -> Result<Pipeline> {
    let examples = if config.strategy.uses_examples() {
        load_examples(config)?
    } else {
        ExampleSet::new()
    };
    let classifier = from_config(config, examples)?;

    let mut extractor = RuleBasedExtractor::new();
    if let Some(now) = now {
        extractor = extractor.with_reference_time(now);
    }

    Pipeline::builder()
        .classifier(classifier)
        .extractor(Arc::new(extractor))
        .build()
}

/// Process one command through the pipeline and its handler.
fn process_line(pipeline: &Pipeline, handlers: &HandlerRegistry, text: &str) -> Result<RunResult> {
    let result = pipeline.process(text)?;
    let action = if result.is_unknown() {
        None
    } else {
        handlers.dispatch(&result)
    };
    Ok(RunResult { result, action })
}

/// Classify, extract and dispatch a single command.
fn run_command(args: &RunArgs, cli_args: &HalberdArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.classifier)?;
    let pipeline = build_pipeline(&config, args.now)?;
    let handlers = HandlerRegistry::default();

    let text = args.joined_text();
    let output = process_line(&pipeline, &handlers, &text)?;
    if output.result.is_unknown() {
        log::info!("could not classify {text:?}");
    }

    output_result(&output, cli_args)
}

/// Classify a single command without extraction.
fn classify_command(args: &ClassifyArgs, cli_args: &HalberdArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.classifier)?;
    let examples = if config.strategy.uses_examples() {
        load_examples(&config)?
    } else {
        ExampleSet::new()
    };
    let classifier = from_config(&config, examples)?;

    let result = classifier.classify(&args.joined_text())?;
    output_result(
        &ClassificationOutput {
            classifier: classifier.name().to_string(),
            result,
        },
        cli_args,
    )
}

/// Read non-blank lines from a file, or stdin when no path is given.
fn read_lines(input: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line.trim().to_string());
        }
    }
    Ok(lines)
}

/// Process many commands in parallel.
fn batch_command(args: &BatchArgs, cli_args: &HalberdArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.classifier)?;
    let pipeline = build_pipeline(&config, args.now)?;
    let handlers = HandlerRegistry::default();
    let lines = read_lines(args.input.as_deref())?;

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(HalberdError::invalid_argument("--threads must be at least 1"));
        }
        pool = pool.num_threads(threads);
    }
    let pool = pool
        .build()
        .map_err(|e| HalberdError::invalid_argument(format!("failed to start workers: {e}")))?;

    let start = Instant::now();
    let results = pool.install(|| {
        lines
            .par_iter()
            .map(|line| process_line(&pipeline, &handlers, line))
            .collect::<Result<Vec<_>>>()
    })?;
    let duration = start.elapsed();

    let unknown = results.iter().filter(|r| r.result.is_unknown()).count();
    log::info!(
        "processed {} commands in {} ms ({} unknown)",
        results.len(),
        duration.as_millis(),
        unknown
    );

    output_result(
        &BatchResults {
            total: results.len(),
            unknown,
            results,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Initialize or show the example corpus.
fn examples_command(args: &ExamplesArgs, cli_args: &HalberdArgs) -> Result<()> {
    match &args.action {
        ExamplesAction::Init { path, force } => {
            if path.exists() && !force {
                return Err(HalberdError::invalid_argument(format!(
                    "{} already exists. Use --force to overwrite.",
                    path.display()
                )));
            }
            let examples = ExampleSet::builtin();
            examples.save(path)?;
            log::info!("wrote {} examples to {}", examples.len(), path.display());
            output_result(&summarize(&examples, Some(path), false), cli_args)
        }
        ExamplesAction::Show { long } => {
            let config = resolve_config(cli_args, &ClassifierOptions::default())?;
            let examples = load_examples(&config)?;
            output_result(
                &summarize(&examples, config.examples_path.as_deref(), *long),
                cli_args,
            )
        }
    }
}

fn summarize(examples: &ExampleSet, path: Option<&Path>, with_phrases: bool) -> ExamplesSummary {
    ExamplesSummary {
        path: path.map(|p| p.display().to_string()),
        intents: examples
            .iter()
            .map(|(intent, phrases)| (intent.to_string(), phrases.len()))
            .collect(),
        total: examples.len(),
        phrases: with_phrases.then(|| {
            examples
                .iter()
                .map(|(intent, phrases)| (intent.to_string(), phrases.to_vec()))
                .collect()
        }),
    }
}
