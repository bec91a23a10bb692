//! Style classification.
//!
//! Each rule is an independent point test over the record; a stock can carry several tags.

use crate::models::{FundamentalsRecord, StockType};

/// Sectors whose earnings move with the economic cycle
pub const CYCLICAL_SECTORS: [&str; 5] = [
    "Energy",
    "Materials",
    "Industrials",
    "Consumer Cyclical",
    "Real Estate",
];

/// Sectors with steady demand regardless of the cycle
pub const DEFENSIVE_SECTORS: [&str; 3] = ["Consumer Defensive", "Healthcare", "Utilities"];

fn above(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v < threshold)
}

/// Two-tier points: `high` if the first test passes, else `low` if the second does
fn tiered(first: bool, high: u32, second: bool, low: u32) -> u32 {
    if first {
        high
    } else if second {
        low
    } else {
        0
    }
}

fn points(hit: bool, pts: u32) -> u32 {
    if hit {
        pts
    } else {
        0
    }
}

pub fn is_growth(data: &FundamentalsRecord) -> bool {
    let score = points(above(data.revenue_growth, 0.15), 1)
        + points(above(data.earnings_growth, 0.15), 1)
        + points(below(data.pe, 60.0), 1);
    score >= 2
}

pub fn is_value(data: &FundamentalsRecord) -> bool {
    let score = tiered(below(data.pe, 15.0), 2, below(data.pe, 20.0), 1)
        + tiered(below(data.pb, 1.5), 2, below(data.pb, 3.0), 1)
        + points(above(data.profit_margin, 0.05), 1);
    score >= 3
}

pub fn is_moat(data: &FundamentalsRecord) -> bool {
    let score = tiered(above(data.roe, 0.20), 2, above(data.roe, 0.15), 1)
        + tiered(above(data.gross_margin, 0.50), 2, above(data.gross_margin, 0.35), 1)
        + points(above(data.profit_margin, 0.15), 1);
    score >= 3
}

/// Meaningful yield, sustainable payout, and cash to fund it
pub fn is_dividend(data: &FundamentalsRecord) -> bool {
    let payout_ok = data.payout_ratio.map_or(true, |ratio| ratio < 0.8);
    above(data.dividend_yield, 0.02) && payout_ok && above(data.fcf, 0.0)
}

pub fn is_cyclical(data: &FundamentalsRecord) -> bool {
    CYCLICAL_SECTORS.contains(&data.sector.as_str())
}

/// Defensive sector with low (or unknown) market sensitivity
pub fn is_defensive(data: &FundamentalsRecord) -> bool {
    DEFENSIVE_SECTORS.contains(&data.sector.as_str()) && data.beta.map_or(true, |beta| beta < 0.8)
}

pub fn is_distressed(data: &FundamentalsRecord) -> bool {
    let score = points(above(data.debt_equity, 200.0), 2)
        + points(below(data.fcf, 0.0), 2)
        + points(below(data.revenue_growth, -0.05), 1)
        + points(below(data.profit_margin, 0.0), 2);
    score >= 3
}

/// Tag a record with every style it qualifies for, in evaluation order.
///
/// Never empty: `Balanced` is returned alone when no other rule matches.
pub fn classify(data: &FundamentalsRecord) -> Vec<StockType> {
    let rules: [(StockType, fn(&FundamentalsRecord) -> bool); 7] = [
        (StockType::Growth, is_growth),
        (StockType::Value, is_value),
        (StockType::Moat, is_moat),
        (StockType::Dividend, is_dividend),
        (StockType::Cyclical, is_cyclical),
        (StockType::Defensive, is_defensive),
        (StockType::Distressed, is_distressed),
    ];

    let mut types: Vec<StockType> = rules
        .iter()
        .filter(|(_, rule)| rule(data))
        .map(|(tag, _)| *tag)
        .collect();

    if types.is_empty() {
        types.push(StockType::Balanced);
    }
    types
}
