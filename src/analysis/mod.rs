//! Fundamental analysis: style classification and composite scoring.
//!
//! Everything in here is pure: a `FundamentalsRecord` goes in, tags and scores
//! come out. Fetching and reporting live elsewhere.

pub mod classifier;
pub mod scoring;

pub use classifier::classify;
pub use scoring::{
    calculate_score, score_cashflow, score_profitability, score_safety, score_valuation,
    NEUTRAL_SAFETY_SCORE,
};
