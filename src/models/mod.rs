use serde::{Deserialize, Serialize};

pub mod config;
pub use config::{Config, DEFAULT_WATCHLIST};

/// Sector/industry value used when the provider has nothing to report
pub const NOT_AVAILABLE: &str = "N/A";

/// Fundamental metrics for a single ticker as of the latest reporting period.
///
/// Every numeric field is optional. A missing value means "insufficient data"
/// and is never interpreted as zero by the scoring or classification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalsRecord {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,

    // Market data
    pub price: Option<f64>,
    pub market_cap: Option<f64>,

    // Valuation
    pub pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub pb: Option<f64>,

    // Profitability (fractional, 0.25 = 25%)
    pub roe: Option<f64>,
    pub gross_margin: Option<f64>,
    pub profit_margin: Option<f64>,

    // Growth (fractional, may be negative)
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,

    // Payout
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,

    // Risk
    pub debt_equity: Option<f64>, // percentage-scaled, 150 = 1.5x
    pub beta: Option<f64>,

    // Liquidity
    pub fcf: Option<f64>,
}

impl FundamentalsRecord {
    /// Record with identity fields only, used when a fetch fails
    pub fn placeholder(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: ticker.to_string(),
            sector: NOT_AVAILABLE.to_string(),
            industry: NOT_AVAILABLE.to_string(),
            price: None,
            market_cap: None,
            pe: None,
            forward_pe: None,
            pb: None,
            roe: None,
            gross_margin: None,
            profit_margin: None,
            revenue_growth: None,
            earnings_growth: None,
            dividend_yield: None,
            payout_ratio: None,
            debt_equity: None,
            beta: None,
            fcf: None,
        }
    }
}

/// Qualitative style tag. Variant order is the order tags are evaluated and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockType {
    Growth,
    Value,
    Moat,
    Dividend,
    Cyclical,
    Defensive,
    Distressed,
    Balanced,
}

impl StockType {
    pub fn label(&self) -> &'static str {
        match self {
            StockType::Growth => "growth",
            StockType::Value => "value",
            StockType::Moat => "moat",
            StockType::Dividend => "dividend",
            StockType::Cyclical => "cyclical",
            StockType::Defensive => "defensive",
            StockType::Distressed => "distressed",
            StockType::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for StockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The four component scores of a screening result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub valuation: f64,     // max 30
    pub profitability: f64, // max 30
    pub cashflow: f64,      // max 25
    pub safety: f64,        // max 15
}

impl SubScores {
    pub fn total(&self) -> f64 {
        self.valuation + self.profitability + self.cashflow + self.safety
    }
}

/// Screening result for one ticker
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub fundamentals: FundamentalsRecord,
    pub scores: SubScores,
    pub total_score: f64,
    pub stock_types: Vec<StockType>,
}

impl ScoredRecord {
    pub fn ticker(&self) -> &str {
        &self.fundamentals.ticker
    }

    /// Tags joined for tabular output, e.g. `growth | moat`
    pub fn stock_types_str(&self) -> String {
        self.stock_types
            .iter()
            .map(StockType::label)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.total_score)
    }
}

/// Display-only rating derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    StronglyWatch,
    Watch,
    Neutral,
    Weak,
    Avoid,
}

impl Grade {
    /// Bracket lower bounds are inclusive
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Grade::StronglyWatch
        } else if score >= 65.0 {
            Grade::Watch
        } else if score >= 50.0 {
            Grade::Neutral
        } else if score >= 35.0 {
            Grade::Weak
        } else {
            Grade::Avoid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::StronglyWatch => "strongly watch",
            Grade::Watch => "watch",
            Grade::Neutral => "neutral",
            Grade::Weak => "weak",
            Grade::Avoid => "avoid",
        }
    }

    pub fn stars(&self) -> &'static str {
        match self {
            Grade::StronglyWatch => "⭐⭐⭐",
            Grade::Watch => "⭐⭐",
            Grade::Neutral => "⭐",
            Grade::Weak => "",
            Grade::Avoid => "❌",
        }
    }

    /// Stars and label together, as shown in the Markdown report
    pub fn display(&self) -> String {
        let stars = self.stars();
        if stars.is_empty() {
            self.label().to_string()
        } else {
            format!("{} {}", stars, self.label())
        }
    }
}
