//! Composite fundamental scoring.
//!
//! Four bracketed sub-scores: valuation (30), profitability (30), cash flow (25), safety (15).

use crate::analysis::classifier::classify;
use crate::models::{FundamentalsRecord, ScoredRecord, SubScores};
use crate::utils::round_to;

/// Safety score when leverage data is unavailable
pub const NEUTRAL_SAFETY_SCORE: f64 = 7.0;

/// Valuation score from trailing P/E and P/B (max 30)
pub fn score_valuation(pe: Option<f64>, pb: Option<f64>) -> f64 {
    let mut score = 0.0;
    if let Some(pe) = pe {
        score += if pe < 12.0 {
            20.0
        } else if pe < 20.0 {
            15.0
        } else if pe < 30.0 {
            8.0
        } else if pe < 40.0 {
            3.0
        } else {
            0.0
        };
    }
    if let Some(pb) = pb {
        score += if pb < 1.5 {
            10.0
        } else if pb < 3.0 {
            7.0
        } else if pb < 5.0 {
            3.0
        } else {
            0.0
        };
    }
    score
}

/// Profitability score from ROE, gross margin and revenue growth (max 30)
pub fn score_profitability(roe: Option<f64>, gross_margin: Option<f64>, revenue_growth: Option<f64>) -> f64 {
    let mut score = 0.0;
    if let Some(roe) = roe {
        score += if roe > 0.25 {
            15.0
        } else if roe > 0.15 {
            12.0
        } else if roe > 0.10 {
            7.0
        } else if roe > 0.05 {
            3.0
        } else {
            0.0
        };
    }
    if let Some(gm) = gross_margin {
        score += if gm > 0.50 {
            10.0
        } else if gm > 0.30 {
            7.0
        } else if gm > 0.15 {
            3.0
        } else {
            0.0
        };
    }
    if let Some(growth) = revenue_growth {
        score += if growth > 0.15 {
            5.0
        } else if growth > 0.05 {
            3.0
        } else if growth > 0.0 {
            1.0
        } else {
            0.0
        };
    }
    score
}

/// Cash-flow score: 15 for positive FCF plus a bonus on FCF yield (max 25)
pub fn score_cashflow(fcf: Option<f64>, market_cap: Option<f64>) -> f64 {
    let (fcf, market_cap) = match (fcf, market_cap) {
        (Some(fcf), Some(cap)) if cap != 0.0 => (fcf, cap),
        _ => return 0.0,
    };
    if fcf <= 0.0 {
        return 0.0;
    }

    let fcf_yield = fcf / market_cap;
    let bonus = if fcf_yield > 0.06 {
        10.0
    } else if fcf_yield > 0.03 {
        6.0
    } else if fcf_yield > 0.01 {
        2.0
    } else {
        0.0
    };
    15.0 + bonus
}

/// Balance-sheet safety from percentage-scaled debt/equity (max 15)
pub fn score_safety(debt_equity: Option<f64>) -> f64 {
    let Some(debt_equity) = debt_equity else {
        return NEUTRAL_SAFETY_SCORE;
    };
    let de = debt_equity / 100.0;
    if de < 0.3 {
        15.0
    } else if de < 0.7 {
        10.0
    } else if de < 1.2 {
        5.0
    } else if de < 2.0 {
        2.0
    } else {
        0.0
    }
}

/// Score and classify a fundamentals record
pub fn calculate_score(fundamentals: FundamentalsRecord) -> ScoredRecord {
    let scores = SubScores {
        valuation: round_to(score_valuation(fundamentals.pe, fundamentals.pb), 1),
        profitability: round_to(
            score_profitability(fundamentals.roe, fundamentals.gross_margin, fundamentals.revenue_growth),
            1,
        ),
        cashflow: round_to(score_cashflow(fundamentals.fcf, fundamentals.market_cap), 1),
        safety: round_to(score_safety(fundamentals.debt_equity), 1),
    };
    let stock_types = classify(&fundamentals);

    ScoredRecord {
        total_score: round_to(scores.total(), 1),
        scores,
        stock_types,
        fundamentals,
    }
}
