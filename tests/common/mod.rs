//! Common test utilities and helpers

use std::collections::HashMap;

use async_trait::async_trait;
use fundamental_screener::api::{FetchError, FundamentalsProvider};
use fundamental_screener::models::FundamentalsRecord;

/// Test data utilities
pub mod test_data {
    use super::*;

    /// Record with no data at all
    pub fn empty_record(ticker: &str) -> FundamentalsRecord {
        FundamentalsRecord::placeholder(ticker)
    }

    /// Cheap, highly profitable, cash-rich, lightly levered
    pub fn quality_compounder(ticker: &str) -> FundamentalsRecord {
        FundamentalsRecord {
            name: format!("{} Holdings", ticker),
            sector: "Technology".to_string(),
            industry: "Software".to_string(),
            price: Some(120.0),
            market_cap: Some(10_000.0),
            pe: Some(10.0),
            forward_pe: Some(9.5),
            pb: Some(1.0),
            roe: Some(0.30),
            gross_margin: Some(0.60),
            profit_margin: Some(0.20),
            revenue_growth: Some(0.20),
            earnings_growth: Some(0.20),
            dividend_yield: Some(0.03),
            payout_ratio: Some(0.5),
            debt_equity: Some(20.0),
            beta: Some(0.5),
            fcf: Some(500.0),
            ..FundamentalsRecord::placeholder(ticker)
        }
    }

    /// Loss-making, shrinking, over-levered energy name
    pub fn distressed_cyclical(ticker: &str) -> FundamentalsRecord {
        FundamentalsRecord {
            name: format!("{} Drilling", ticker),
            sector: "Energy".to_string(),
            industry: "Oil & Gas E&P".to_string(),
            price: Some(4.2),
            market_cap: Some(800.0),
            pe: None,
            pb: Some(0.6),
            roe: Some(-0.12),
            gross_margin: Some(0.18),
            profit_margin: Some(-0.08),
            revenue_growth: Some(-0.20),
            debt_equity: Some(340.0),
            beta: Some(1.9),
            fcf: Some(-120.0),
            ..FundamentalsRecord::placeholder(ticker)
        }
    }

    /// Consumer staple with a steady dividend
    pub fn defensive_payer(ticker: &str) -> FundamentalsRecord {
        FundamentalsRecord {
            name: format!("{} Foods", ticker),
            sector: "Consumer Defensive".to_string(),
            industry: "Packaged Foods".to_string(),
            price: Some(61.0),
            market_cap: Some(50_000.0),
            pe: Some(22.0),
            forward_pe: Some(20.0),
            pb: Some(4.0),
            roe: Some(0.18),
            gross_margin: Some(0.42),
            profit_margin: Some(0.12),
            revenue_growth: Some(0.03),
            earnings_growth: Some(0.04),
            dividend_yield: Some(0.032),
            payout_ratio: Some(0.65),
            debt_equity: Some(90.0),
            beta: Some(0.55),
            fcf: Some(2_000.0),
            ..FundamentalsRecord::placeholder(ticker)
        }
    }
}

/// Provider serving canned records; unknown tickers fail like a missing quote
pub struct StubProvider {
    records: HashMap<String, FundamentalsRecord>,
}

impl StubProvider {
    pub fn new(records: Vec<FundamentalsRecord>) -> Self {
        Self {
            records: records.into_iter().map(|r| (r.ticker.clone(), r)).collect(),
        }
    }
}

#[async_trait]
impl FundamentalsProvider for StubProvider {
    async fn fetch_fundamentals(&self, ticker: &str) -> Result<FundamentalsRecord, FetchError> {
        self.records
            .get(ticker)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(ticker.to_string()))
    }
}

/// Logging utilities for tests
pub mod logging {
    use tracing::{debug, info};

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
