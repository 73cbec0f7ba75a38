//! TickScore CLI — replay, simulate and configuration commands.
//!
//! Commands:
//! - `replay` — drive the signal desk from a CSV price feed
//! - `simulate` — drive the signal desk from a deterministic synthetic feed
//! - `config` — print the default engine configuration as TOML
//! - `pairs` — list the default trading pairs
//!
//! Signals are written to stdout as JSON lines; logs and the run summary go
//! to stderr. Log verbosity follows `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tickscore_core::desk::{DEFAULT_MIN_CONFIDENCE, DEFAULT_PAIRS};
use tickscore_core::feed::{read_feed, synthetic_feed, FeedRecord};
use tickscore_core::{EngineConfig, SignalDesk, SignalDirection};

/// Pair name for feed rows that carry none.
const UNNAMED_PAIR: &str = "default";

#[derive(Parser)]
#[command(
    name = "tickscore",
    about = "TickScore CLI — periodic BUY/SELL signals from rolling indicators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a CSV feed (timestamp,pair,price,high,low) through the engine.
    Replay {
        /// Path to the CSV feed.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML engine config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only replay this pair. Also names rows without a pair column.
        #[arg(long)]
        pair: Option<String>,

        /// Drop signals below this confidence.
        #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
        min_confidence: f64,
    },
    /// Run the engine over a synthetic one-tick-per-minute feed.
    Simulate {
        /// Trading pair to simulate.
        #[arg(long, default_value = "EUR/GBP OTC")]
        pair: String,

        /// Number of minute ticks to generate.
        #[arg(long, default_value_t = 1440)]
        minutes: usize,

        /// Seed for the random walk.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Feed start (RFC 3339). Defaults to now.
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Path to a TOML engine config. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Drop signals below this confidence.
        #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE)]
        min_confidence: f64,
    },
    /// Print the default engine configuration as TOML.
    Config,
    /// List the default trading pairs.
    Pairs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            config,
            pair,
            min_confidence,
        } => run_replay(&input, config.as_deref(), pair, min_confidence),
        Commands::Simulate {
            pair,
            minutes,
            seed,
            start,
            config,
            min_confidence,
        } => run_simulate(
            &pair,
            minutes,
            seed,
            start.unwrap_or_else(Utc::now),
            config.as_deref(),
            min_confidence,
        ),
        Commands::Config => run_config(),
        Commands::Pairs => run_pairs(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tickscore=info,tickscore_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn build_desk(config: Option<&Path>, min_confidence: f64) -> Result<SignalDesk> {
    let desk = SignalDesk::new(load_config(config)?)?.with_min_confidence(min_confidence)?;
    Ok(desk)
}

fn run_replay(
    input: &Path,
    config: Option<&Path>,
    pair_filter: Option<String>,
    min_confidence: f64,
) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("opening feed {}", input.display()))?;
    let records = read_feed(BufReader::new(file))
        .with_context(|| format!("reading feed {}", input.display()))?;
    info!(path = %input.display(), rows = records.len(), "feed loaded");

    let mut desk = build_desk(config, min_confidence)?;
    let summary = drive(&mut desk, &records, pair_filter.as_deref())?;
    print_summary(&summary, &desk);
    Ok(())
}

fn run_simulate(
    pair: &str,
    minutes: usize,
    seed: u64,
    start: DateTime<Utc>,
    config: Option<&Path>,
    min_confidence: f64,
) -> Result<()> {
    let records = synthetic_feed(pair, start, minutes, seed);
    info!(pair, minutes, seed, %start, "synthetic feed generated");

    let mut desk = build_desk(config, min_confidence)?.with_pairs([pair]);
    let summary = drive(&mut desk, &records, None)?;
    print_summary(&summary, &desk);
    Ok(())
}

fn run_config() -> Result<()> {
    print!("{}", EngineConfig::default().to_toml()?);
    Ok(())
}

fn run_pairs() -> Result<()> {
    for pair in DEFAULT_PAIRS {
        println!("{pair}");
    }
    Ok(())
}

#[derive(Debug, Default)]
struct RunSummary {
    ticks: usize,
    skipped: usize,
    buys: usize,
    sells: usize,
}

/// Feed every record to the desk in file order, writing delivered signals
/// to stdout as JSON lines.
fn drive(
    desk: &mut SignalDesk,
    records: &[FeedRecord],
    pair_filter: Option<&str>,
) -> Result<RunSummary> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summary = RunSummary::default();

    for record in records {
        let pair = record
            .pair
            .as_deref()
            .or(pair_filter)
            .unwrap_or(UNNAMED_PAIR);
        if pair_filter.is_some_and(|wanted| wanted != pair) {
            summary.skipped += 1;
            continue;
        }

        // Rows were validated by the reader.
        let snapshot = record.snapshot()?;
        summary.ticks += 1;
        if let Some(signal) = desk.tick(pair, record.timestamp, &snapshot) {
            serde_json::to_writer(&mut out, &signal)?;
            writeln!(out)?;
            match signal.signal.direction {
                SignalDirection::Buy => summary.buys += 1,
                SignalDirection::Sell => summary.sells += 1,
            }
        }
    }

    if summary.ticks == 0 {
        warn!(skipped = summary.skipped, "no rows matched");
    }
    Ok(summary)
}

fn print_summary(summary: &RunSummary, desk: &SignalDesk) {
    let stats = desk.stats();
    eprintln!();
    eprintln!("=== Run Summary ===");
    eprintln!("Pairs:        {}", desk.pairs().count());
    eprintln!("Ticks:        {}", summary.ticks);
    if summary.skipped > 0 {
        eprintln!("Skipped:      {}", summary.skipped);
    }
    eprintln!("Signals:      {}", summary.buys + summary.sells);
    eprintln!("  BUY:        {}", summary.buys);
    eprintln!("  SELL:       {}", summary.sells);
    if let Some(day) = stats.day {
        eprintln!(
            "Last day:     {day} ({} delivered, {} suppressed)",
            stats.signals_today, stats.suppressed_today
        );
    }
    eprintln!("Min conf:     {:.2}", desk.min_confidence());
}
