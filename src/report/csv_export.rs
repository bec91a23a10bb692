//! Results CSV: one row per ticker, fixed column order.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::ScoredRecord;

/// One CSV row. Field order is the column order; absent values are empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub stock_types_str: String,
    pub price: Option<f64>,
    pub total_score: f64,
    pub score_valuation: f64,
    pub score_profitability: f64,
    pub score_cashflow: f64,
    pub score_safety: f64,
    pub pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb: Option<f64>,
    pub roe: Option<f64>,
    pub gross_margin: Option<f64>,
    pub profit_margin: Option<f64>,
    pub debt_equity: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub beta: Option<f64>,
    pub market_cap: Option<f64>,
}

impl From<&ScoredRecord> for ResultRow {
    fn from(scored: &ScoredRecord) -> Self {
        let f = &scored.fundamentals;
        Self {
            ticker: f.ticker.clone(),
            name: f.name.clone(),
            sector: f.sector.clone(),
            industry: f.industry.clone(),
            stock_types_str: scored.stock_types_str(),
            price: f.price,
            total_score: scored.total_score,
            score_valuation: scored.scores.valuation,
            score_profitability: scored.scores.profitability,
            score_cashflow: scored.scores.cashflow,
            score_safety: scored.scores.safety,
            pe: f.pe,
            forward_pe: f.forward_pe,
            pb: f.pb,
            roe: f.roe,
            gross_margin: f.gross_margin,
            profit_margin: f.profit_margin,
            debt_equity: f.debt_equity,
            revenue_growth: f.revenue_growth,
            dividend_yield: f.dividend_yield,
            beta: f.beta,
            market_cap: f.market_cap,
        }
    }
}

/// Write ranked results to a CSV file, overwriting it
pub fn write_results_csv(path: &Path, results: &[ScoredRecord]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create results CSV '{}'", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    for scored in results {
        writer
            .serialize(ResultRow::from(scored))
            .with_context(|| format!("Failed to write CSV row for {}", scored.ticker()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush results CSV '{}'", path.display()))?;
    Ok(())
}

/// Read a results CSV written by [`write_results_csv`]
pub fn read_results_csv(path: &Path) -> Result<Vec<ResultRow>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open results CSV '{}'", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let row: ResultRow = row.with_context(|| format!("Invalid results CSV row {}", i + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
