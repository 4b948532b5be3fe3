//! Market OI CLI
//!
//! Loads daily symbol snapshots and reports market-wide OI:
//! - `series`: every configured date with its trend line
//! - `day`: statistics for a single selected date

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_oi::{DataSource, MarketOiConfig, MarketSession, SeriesReport};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "market-oi";

/// Market OI report generator
#[derive(Parser)]
#[clap(name = "market-oi")]
#[clap(about = "Volume-weighted market open interest from daily snapshots")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Read snapshots from this directory
    #[clap(long, global = true, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Fetch snapshots from this base URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Trend line window
    #[clap(long, global = true)]
    window: Option<usize>,

    /// Per-date load timeout in seconds
    #[clap(long, global = true)]
    timeout_secs: Option<u64>,

    /// Emit JSON instead of text
    #[clap(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate every configured date and smooth the net OI
    Series,

    /// Show statistics for one date
    Day {
        /// Date identifier (e.g. 14040730)
        date: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));

    let collector = config.collector();

    match cli.command {
        Commands::Series => {
            let series = collector.collect(&config.dates).await?;
            let report = SeriesReport::from_series(&series, config.trend_window);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
        }
        Commands::Day { date } => {
            let entry = config.date_entry(&date);
            let session = MarketSession::open(&collector, entry)
                .await
                .with_context(|| format!("no data for {date}"))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(session.report())?);
            } else {
                print!("{}", session.report().render_text());
            }
        }
    }

    Ok(())
}

/// Merge the config file (or defaults) with command-line overrides
fn resolve_config(cli: &Cli) -> Result<MarketOiConfig> {
    let mut config = match &cli.config {
        Some(path) => MarketOiConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MarketOiConfig::default(),
    };

    if let Some(root) = &cli.data_dir {
        config.source = DataSource::File { root: root.clone() };
    }
    if let Some(base_url) = &cli.base_url {
        config.source = DataSource::Http {
            base_url: base_url.clone(),
        };
    }
    if let Some(window) = cli.window {
        config.trend_window = window;
    }
    if let Some(secs) = cli.timeout_secs {
        config.load_timeout_secs = Some(secs);
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing with environment filter
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", SERVICE_NAME.replace('-', "_")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .context("initializing tracing")?;

    Ok(())
}
