//! Command-line interface for chronicle.
//!
//! Provides commands for generating timelines, inspecting per-sentence
//! classification, and printing the resolved configuration.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::adapters::{LlmSummarizer, NoopSummarizer, Summarizer};
use crate::config;
use crate::core::{tag_passage, TimelineEngine};

/// chronicle - temporal resolution and timeline assembly engine
#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a timeline from a passage of text
    Generate {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Read input from stdin
        #[arg(long)]
        stdin: bool,

        /// Pretty-print the output JSON
        #[arg(long)]
        pretty: bool,

        /// Skip the external summarizer and keep raw sentence text
        #[arg(long)]
        no_summarize: bool,
    },

    /// Classify sentences without resolving dates
    Classify {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Read input from stdin
        #[arg(long)]
        stdin: bool,

        /// Print the passage with <EVENT> markers instead of a listing
        #[arg(long)]
        tagged: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the parsed command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate {
                input,
                stdin,
                pretty,
                no_summarize,
            } => generate(input, stdin, pretty, no_summarize).await,

            Commands::Classify {
                input,
                stdin,
                tagged,
            } => classify(input, stdin, tagged),

            Commands::Config => show_config(),
        }
    }
}

/// Read input from a file or stdin
fn read_input(input: Option<PathBuf>, use_stdin: bool) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            if !use_stdin && atty_is_terminal() {
                anyhow::bail!("No input provided. Use --input <file> or pipe text via stdin.");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn atty_is_terminal() -> bool {
    use std::io::IsTerminal;
    io::stdin().is_terminal()
}

fn build_engine(no_summarize: bool) -> Result<TimelineEngine> {
    let cfg = config::config()?;

    let summarizer: Arc<dyn Summarizer> = if no_summarize {
        Arc::new(NoopSummarizer)
    } else {
        Arc::new(LlmSummarizer::new(cfg.summarizer.clone()))
    };

    Ok(TimelineEngine::new(summarizer).with_options(cfg.engine_options()))
}

async fn generate(
    input: Option<PathBuf>,
    stdin: bool,
    pretty: bool,
    no_summarize: bool,
) -> Result<()> {
    let text = read_input(input, stdin)?;
    let engine = build_engine(no_summarize)?;

    let report = engine.generate(&text).await?;

    for warning in &report.warnings {
        warn!(
            sentence = warning.sentence_index,
            condition = %warning.condition,
            "recovered condition"
        );
    }

    let json = if pretty {
        report.to_json_pretty()?
    } else {
        report.to_json()?
    };
    println!("{json}");

    Ok(())
}

fn classify(input: Option<PathBuf>, stdin: bool, tagged: bool) -> Result<()> {
    let text = read_input(input, stdin)?;
    let engine = build_engine(true)?;

    let (classified, warnings) = engine.classify_document(&text)?;

    if tagged {
        print!("{}", tag_passage(&classified));
    } else {
        for cs in &classified {
            let class = serde_json::to_string(&cs.class)?;
            println!("[{}] {} {}", cs.sentence.index, class, cs.sentence.text);
        }
    }

    for warning in &warnings {
        warn!(
            sentence = warning.sentence_index,
            condition = %warning.condition,
            "recovered condition"
        );
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("Summarizer URL:     {}", cfg.summarizer.base_url);
    println!("Summarizer model:   {}", cfg.summarizer.model);
    println!("Summary timeout:    {:?}", cfg.summary_timeout);
    println!("Max input bytes:    {}", cfg.max_input_bytes);
    match &cfg.config_file {
        Some(path) => println!("Config file:        {}", path.display()),
        None => println!("Config file:        (none found, using defaults)"),
    }

    Ok(())
}
