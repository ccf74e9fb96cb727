//! Parking KPI Evaluator - Main Entry Point
//!
//! Evaluates a decoded recording against its ground truth and prints the
//! KPI summary as JSON. Exit code 0 on pass, 2 on KPI failure, 1 on error.

mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use kpi::KpiEvaluator;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use settings::{LogSettings, Preset, Settings};

#[derive(Parser)]
#[command(name = "kpi-eval")]
#[command(about = "Evaluate parking line detections against ground truth")]
#[command(version)]
struct Cli {
    /// Decoded recording (JSON)
    recording: PathBuf,

    /// Configuration file (TOML); defaults to ./parking-kpi.toml if present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threshold preset the configuration file overrides
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Include per-frame results in the output
    #[arg(long)]
    frames: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref(), cli.preset)
        .context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        settings.log.level = level;
    }
    init_logging(&settings.log)?;

    info!("=== Parking KPI Evaluator v{} ===", env!("CARGO_PKG_VERSION"));

    let evaluator = KpiEvaluator::new(settings.kpi.clone());
    let mut summary = evaluator
        .evaluate_file(&cli.recording)
        .with_context(|| format!("Failed to evaluate {}", cli.recording.display()))?;

    if !(cli.frames || settings.include_frames) {
        summary.frame_results.clear();
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.verdict.is_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(2))
    }
}

/// Initialize logging
fn init_logging(log: &LogSettings) -> Result<()> {
    let level: Level = log
        .level
        .parse()
        .with_context(|| format!("Invalid log level: {}", log.level))?;

    // Logs go to stderr, stdout carries the summary
    if log.json {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("Failed to set tracing subscriber")?;
    }

    Ok(())
}
