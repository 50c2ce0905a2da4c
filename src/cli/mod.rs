//! Command-line interface for wordflip
//!
//! Parses arguments with clap, sets up logging, merges configuration and
//! hands off to the coordinator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::config::WordflipConfig;
use crate::parallel;

mod output;
mod report;

pub use output::Output;

/// Output format for the run summary
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON format
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "wordflip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Reverse every word of a file using parallel, word-aligned slices",
    long_about = "wordflip splits the input into one word-aligned slice per thread, reverses \
                  every space-separated word in each slice concurrently, and writes the slices \
                  back in their original order. Newlines stay where they were."
)]
pub struct Cli {
    /// Number of worker threads (positive integer, default 4)
    #[arg(value_name = "THREADS", value_parser = parse_thread_count)]
    pub threads: Option<usize>,

    /// File to read words from [default: input.txt]
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// File to write reversed words to, truncated first [default: output.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Drop the space after the last word of the file
    #[arg(long)]
    pub no_trailing_space: bool,

    /// Summary format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

/// Only the settings given on the command line, layered over every config file
#[derive(Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trailing_space: Option<bool>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        // JSON goes to stdout on its own
        let output = Output::new(self.verbose > 0, self.quiet || self.format == OutputFormat::Json);

        if self.threads.is_none() {
            output.verbose("No thread count specified, using configured default");
        }

        let overrides = CliOverrides {
            threads: self.threads,
            input: self.input,
            output: self.output,
            trailing_space: self.no_trailing_space.then_some(false),
        };
        let config = WordflipConfig::load(self.config.as_deref(), Some(overrides))
            .context("Failed to load configuration")?;
        config.validate()?;

        output.verbose(&format!("Program will use {} threads", config.threads));

        let report = parallel::run(&config).with_context(|| {
            format!(
                "Failed to reverse {} into {}",
                config.input.display(),
                config.output.display()
            )
        })?;

        match self.format {
            OutputFormat::Text => report::print_text(&output, &report),
            OutputFormat::Json => report::print_json(&report)?,
        }

        Ok(())
    }
}

/// Thread counts must parse as an integer greater than zero
fn parse_thread_count(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{value}' is not a positive integer")),
        Ok(threads) => Ok(threads),
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
