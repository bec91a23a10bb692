use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fundamental_screener::api::YahooClient;
use fundamental_screener::models::Config;
use fundamental_screener::report::{format_summary_table, write_reports};
use fundamental_screener::screener::run_screener;

/// Fundamental stock screener
#[derive(Parser)]
#[command(name = "fundamental-screener")]
#[command(version)]
#[command(about = "Score and rank a watchlist on valuation, profitability, cash flow and safety")]
#[command(long_about = "
Fetches fundamentals for each ticker, scores them on four sub-scores, tags
investment styles and writes ranked CSV and Markdown reports.

The watchlist comes from --tickers, else CUSTOM_TICKERS, else a built-in default.

Examples:
  fundamental-screener
  fundamental-screener --tickers AAPL,MSFT,KO
  fundamental-screener --output-dir /tmp/screening --quiet
")]
struct Args {
    /// Comma-separated tickers (overrides CUSTOM_TICKERS)
    #[arg(long)]
    tickers: Option<String>,

    /// Directory for report files (overrides RESULTS_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Don't print the summary table
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fundamental_screener=info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::from_env()?.with_overrides(args.tickers.as_deref(), args.output_dir);
    info!("📋 Watchlist: {}", config.tickers.join(", "));

    let client = YahooClient::new(&config)?;
    let run = run_screener(&client, &config.tickers).await;

    let paths = write_reports(&config.results_dir, &run.results, run.started_at)?;
    info!("📄 {}", paths.dated_csv.display());

    if !args.quiet {
        println!("{}", format_summary_table(&run.results));
    }

    Ok(())
}
