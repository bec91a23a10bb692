//! Screening run: fetch, score and rank a watchlist.
//!
//! Tickers are processed strictly one at a time in input order. A failed fetch
//! never aborts the run; the ticker is scored from an empty placeholder instead,
//! so every input ticker yields exactly one result row.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::analysis::calculate_score;
use crate::api::FundamentalsProvider;
use crate::models::{FundamentalsRecord, ScoredRecord};

/// Result of a screening run
#[derive(Debug, Clone)]
pub struct ScreeningRun {
    /// Sorted by total score, highest first
    pub results: Vec<ScoredRecord>,
    pub fetched: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
}

/// Fetch, score and rank every ticker in the watchlist
pub async fn run_screener<P>(provider: &P, tickers: &[String]) -> ScreeningRun
where
    P: FundamentalsProvider + ?Sized,
{
    let started_at = Utc::now();
    let total = tickers.len();
    info!("🔍 Screening {} tickers", total);

    let mut results = Vec::with_capacity(total);
    let mut failed = 0;

    for (i, ticker) in tickers.iter().enumerate() {
        info!("[{:02}/{}] Fetching {}", i + 1, total, ticker);

        let fundamentals = match provider.fetch_fundamentals(ticker).await {
            Ok(record) => record,
            Err(e) => {
                warn!("⚠️  {} fetch failed, scoring placeholder: {}", ticker, e);
                failed += 1;
                FundamentalsRecord::placeholder(ticker)
            }
        };

        results.push(calculate_score(fundamentals));
    }

    rank_by_score(&mut results);

    info!(
        "✅ Screened {} tickers ({} fetched, {} failed)",
        total,
        total - failed,
        failed
    );

    ScreeningRun {
        results,
        fetched: total - failed,
        failed,
        started_at,
    }
}

/// Sort by total score descending; ties keep their fetch order
pub fn rank_by_score(results: &mut [ScoredRecord]) {
    // sort_by is stable
    results.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}
