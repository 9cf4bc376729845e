//! Binary entrypoint for the catalog dry-run tool.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use frame_catalog::config::Configuration;
use frame_catalog::session::FrameSession;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "frame-catalog", about = "weighted media selection dry run")]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Number of weighted draws to print
    #[arg(long, value_name = "COUNT", default_value_t = 20)]
    samples: usize,

    /// Deterministic sampler seed (overrides the config)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("frame_catalog={}", level).parse().unwrap());
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = Configuration::from_yaml_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        cfg.sampler_seed = Some(seed);
    }
    let cfg = cfg.validated().context("validating configuration")?;

    let mut session = FrameSession::new(&cfg);
    session
        .refresh()
        .with_context(|| format!("loading media catalog {}", session.db_path().display()))?;
    info!(
        favorites = session.catalog().favorites().len(),
        normal = session.catalog().normal().len(),
        "catalog loaded"
    );

    println!(
        "# catalog dry run\n# favorites: {}\n# normal: {}\n# draws: {}\n# seed: {}\n",
        session.catalog().favorites().len(),
        session.catalog().normal().len(),
        cli.samples,
        cfg.sampler_seed
            .map_or_else(|| "(entropy)".to_string(), |s| s.to_string())
    );

    for idx in 0..cli.samples {
        let record = session.next_media()?;
        let marker = if record.is_favorite { "  [favorite]" } else { "" };
        println!("  {:>4}: {}{}", idx + 1, record.relative_path, marker);
    }

    Ok(())
}
