// =============================================================================
// Stock Insight — Main Entry Point
// =============================================================================
//
// Pick one of the configured tickers, run the analysis pipeline over its
// local daily history, print the report and write the artifacts. A failed
// run prints a single error line and writes nothing.
// =============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stock_insight::error::USER_FAILURE_MESSAGE;
use stock_insight::market_data::CsvPriceSource;
use stock_insight::runtime_config::AnalystConfig;
use stock_insight::{write_artifacts, Pipeline};

const DEFAULT_CONFIG_PATH: &str = "analyst_config.json";

/// Technical analysis report (MA20, MA50, RSI(14), Bollinger bands) for one
/// security.
#[derive(Debug, Parser)]
#[command(name = "stock-insight", version, about)]
struct Cli {
    /// Ticker to analyse; must be one of the configured tickers.
    ticker: Option<String>,

    /// Path of the JSON configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory holding `<TICKER>.csv` history files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving reports and artifacts.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// First date of history to analyse (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Print the selectable tickers and exit.
    #[arg(long)]
    list: bool,

    /// Save the effective configuration to the config path.
    #[arg(long)]
    save_config: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // ── 2. Config: file → env → flags ────────────────────────────────────
    let mut config = AnalystConfig::load(&cli.config).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AnalystConfig::default()
    });
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(start) = cli.start {
        config.start_date = start;
    }

    if cli.save_config {
        config.save(&cli.config)?;
    }

    if cli.list {
        for ticker in &config.tickers {
            println!("{ticker}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    // ── 3. Ticker selection ──────────────────────────────────────────────
    let Some(input) = cli.ticker else {
        eprintln!("No ticker selected. Choose one of: {}", config.tickers.join(", "));
        return Ok(ExitCode::from(2));
    };
    let Some(ticker) = config.select_ticker(&input).map(str::to_string) else {
        eprintln!(
            "Unknown ticker {input}. Choose one of: {}",
            config.tickers.join(", ")
        );
        return Ok(ExitCode::from(2));
    };

    info!(
        ticker = %ticker,
        start_date = %config.start_date,
        data_dir = %config.data_dir.display(),
        "Starting analysis"
    );

    // ── 4. Run ───────────────────────────────────────────────────────────
    let pipeline = Pipeline::new(Box::new(CsvPriceSource::new(&config.data_dir)));

    let output = match pipeline.run(&ticker, config.start_date) {
        Ok(output) => output,
        Err(e) => {
            // The pipeline already logged the distinct kind.
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::FAILURE);
        }
    };

    // ── 5. Persist, then present ─────────────────────────────────────────
    let paths = match write_artifacts(&output, &config.output_dir) {
        Ok(paths) => paths,
        Err(e) => {
            error!(error = %e, "Failed to write artifacts");
            eprintln!("{USER_FAILURE_MESSAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", output.report);
    for path in paths {
        println!("Saved {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
