//! rusted - headless driver for the RUSTED survival simulation
//!
//! Generates an island, replays scripted input against it and optionally
//! writes a JSONL event stream and a metrics report.

mod config;
mod headless;
mod narrator;
mod scripted_input;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, DEFAULT_SETTINGS_PATH};
use headless::HeadlessConfig;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the RUSTED survival simulation", long_about = None)]
struct Args {
    /// World seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulation ticks to run (60 per second of game time)
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,

    /// Scripted input file (JSON steps)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Settings TOML file
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// JSON recipe book overriding the stock recipes
    #[arg(long)]
    recipes: Option<PathBuf>,

    /// Write a JSONL event stream here
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Write a JSON metrics report here
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// HTTP endpoint for narration; offline lines are used when omitted
    #[arg(long)]
    narrative_endpoint: Option<String>,

    /// Narration request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    narrative_timeout_ms: u64,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting rusted v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let app = AppConfig::load_from_path(&args.settings);
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "world seed");

    let cfg = HeadlessConfig {
        seed,
        ticks: args.ticks,
        settings: app.settings,
        worldgen: app.worldgen,
        recipes: args.recipes.or(app.recipes),
        scripted_input: args.script,
        event_log: args.event_log,
        metrics: args.metrics,
        narrative_endpoint: args.narrative_endpoint,
        narrative_timeout: Duration::from_millis(args.narrative_timeout_ms),
        realtime: args.realtime,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let summary = runtime.block_on(headless::run(cfg))?;

    println!(
        "seed {seed}: {} ticks, {} deaths, {} kills, {} harvests, {} crafts, health {:.1}",
        summary.ticks,
        summary.deaths,
        summary.kills,
        summary.harvests,
        summary.crafts,
        summary.final_health
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let args = Args::parse_from(["rusted"]);
        assert_eq!(args.ticks, 3_600);
        assert_eq!(args.settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
        assert!(args.seed.is_none());
        assert!(!args.realtime);
    }

    #[test]
    fn cli_overrides() {
        let args = Args::parse_from([
            "rusted",
            "--seed",
            "42",
            "--ticks",
            "10",
            "--narrative-endpoint",
            "http://127.0.0.1:9000/narrate",
            "--realtime",
        ]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.ticks, 10);
        assert_eq!(
            args.narrative_endpoint.as_deref(),
            Some("http://127.0.0.1:9000/narrate")
        );
        assert!(args.realtime);
    }
}
