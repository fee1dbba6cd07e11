//! ODD CLI - Command-line interface
//!
//! Usage:
//!   odd extract "The red car stopped near the old building."
//!   odd extract --file scenario.txt
//!   odd template

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use odd_core::ExtractorConfig;
use odd_extractor::{ExtractionStatus, GazetteerRecognizer, LexiconAnalyzer, OddExtractor};

#[derive(Parser)]
#[command(name = "odd")]
#[command(about = "ODD descriptor extraction CLI")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract an ODD record from scenario text
    Extract {
        /// Scenario text (omit when using --file)
        text: Option<String>,

        /// Read scenario text from a file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the extraction result as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Print the baseline record without running extraction
    Template,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExtractorConfig::from_file(path)?.with_env_override()?,
        None => ExtractorConfig::from_env()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_file(config.logging.include_location)
        .with_line_number(config.logging.include_location)
        .init();

    let extractor = OddExtractor::with_config(
        Arc::new(LexiconAnalyzer::new()),
        Arc::new(GazetteerRecognizer::new()),
        config,
    );

    match cli.command {
        Commands::Extract { text, file, json } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(path)?,
                (None, None) => anyhow::bail!("provide scenario text or --file <path>"),
            };

            let report = extractor.extract(&text)?;
            if report.status == ExtractionStatus::EmptyInput {
                eprintln!("No text to extract; emitting the baseline record.");
            } else if json {
                eprintln!("{}", serde_json::to_string_pretty(&report.result)?);
            } else {
                for entity in &report.result.entities {
                    eprintln!("{}: {} ({})", entity.id, entity.text, entity.category);
                }
            }
            println!("{}", report.record.to_yaml()?);
        }
        Commands::Template => {
            let report = extractor.extract("")?;
            println!("{}", report.record.to_yaml()?);
        }
    }

    Ok(())
}
