use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::models::{Config, FundamentalsRecord, NOT_AVAILABLE};
use super::{ApiRateLimiter, FetchError, FundamentalsProvider};

const QUOTE_SUMMARY_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,assetProfile,cashflowStatementHistory";
const CASHFLOW_TIMESERIES_TYPES: &str = "annualOperatingCashFlow,annualCapitalExpenditure";

/// Start of the timeseries window (2016-12-31 UTC); annual statements before it are never needed
const TIMESERIES_PERIOD_START: i64 = 1_483_142_400;

/// Yahoo numeric cell: `{"raw": 28.5, "fmt": "28.50"}`, or `{}` when unreported
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<Value>,
}

fn raw(value: &Option<RawValue>) -> Option<f64> {
    value
        .as_ref()
        .and_then(|v| v.raw.as_ref())
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummary,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    price: Option<PriceModule>,
    summary_detail: Option<SummaryDetail>,
    default_key_statistics: Option<KeyStatistics>,
    financial_data: Option<FinancialData>,
    asset_profile: Option<AssetProfile>,
    cashflow_statement_history: Option<CashflowHistory>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    dividend_yield: Option<RawValue>,
    payout_ratio: Option<RawValue>,
    beta: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatistics {
    price_to_book: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    beta: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<RawValue>,
    return_on_equity: Option<RawValue>,
    gross_margins: Option<RawValue>,
    profit_margins: Option<RawValue>,
    debt_to_equity: Option<RawValue>,
    revenue_growth: Option<RawValue>,
    earnings_growth: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashflowHistory {
    #[serde(default)]
    cashflow_statements: Vec<CashflowStatement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CashflowStatement {
    total_cash_from_operating_activities: Option<RawValue>,
    capital_expenditures: Option<RawValue>,
}

/// Free cash flow as operating cash flow minus capital expenditure.
///
/// Capex is taken by magnitude: Yahoo reports it signed negative, but a positive
/// value is still an outflow and must not inflate FCF.
pub fn derive_fcf(operating_cash_flow: Option<f64>, capital_expenditure: Option<f64>) -> Option<f64> {
    match (operating_cash_flow, capital_expenditure) {
        (Some(operating), Some(capex)) => Some(operating - capex.abs()),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct TimeseriesEnvelope {
    timeseries: TimeseriesBody,
}

#[derive(Debug, Deserialize)]
struct TimeseriesBody {
    result: Option<Vec<TimeseriesSeries>>,
}

/// One series per requested type; the other type's key is simply absent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeseriesSeries {
    #[serde(default)]
    annual_operating_cash_flow: Vec<Option<TimeseriesPoint>>,
    #[serde(default)]
    annual_capital_expenditure: Vec<Option<TimeseriesPoint>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeseriesPoint {
    as_of_date: Option<String>,
    reported_value: Option<RawValue>,
}

fn dated_values(points: Vec<Option<TimeseriesPoint>>) -> Vec<(String, f64)> {
    points
        .into_iter()
        .flatten()
        .filter_map(|point| Some((point.as_of_date?, raw(&point.reported_value)?)))
        .collect()
}

/// FCF from the most recent fiscal year reporting both operating cash flow and capex
fn parse_timeseries_fcf(body: &str) -> Option<f64> {
    let envelope: TimeseriesEnvelope = serde_json::from_str(body).ok()?;

    let mut operating = Vec::new();
    let mut capex = Vec::new();
    for series in envelope.timeseries.result.unwrap_or_default() {
        operating.extend(dated_values(series.annual_operating_cash_flow));
        capex.extend(dated_values(series.annual_capital_expenditure));
    }

    // ISO dates order lexicographically
    operating.sort_by(|a, b| b.0.cmp(&a.0));
    operating.into_iter().find_map(|(date, cash)| {
        let spent = capex.iter().find(|(d, _)| *d == date).map(|(_, v)| *v);
        derive_fcf(Some(cash), spent)
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Map a quoteSummary result onto the screener's record
fn into_record(ticker: &str, result: QuoteSummaryResult) -> FundamentalsRecord {
    let price = result.price.unwrap_or_default();
    let summary = result.summary_detail.unwrap_or_default();
    let stats = result.default_key_statistics.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let profile = result.asset_profile.unwrap_or_default();

    // Most recent statement comes first
    let fcf = result
        .cashflow_statement_history
        .and_then(|history| history.cashflow_statements.into_iter().next())
        .and_then(|statement| {
            derive_fcf(
                raw(&statement.total_cash_from_operating_activities),
                raw(&statement.capital_expenditures),
            )
        });

    FundamentalsRecord {
        ticker: ticker.to_string(),
        name: non_empty(price.short_name)
            .or_else(|| non_empty(price.long_name))
            .unwrap_or_else(|| ticker.to_string()),
        sector: non_empty(profile.sector).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        industry: non_empty(profile.industry).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        price: raw(&financial.current_price).or_else(|| raw(&price.regular_market_price)),
        market_cap: raw(&price.market_cap).or_else(|| raw(&summary.market_cap)),
        pe: raw(&summary.trailing_pe),
        forward_pe: raw(&summary.forward_pe).or_else(|| raw(&stats.forward_pe)),
        pb: raw(&stats.price_to_book),
        roe: raw(&financial.return_on_equity),
        gross_margin: raw(&financial.gross_margins),
        profit_margin: raw(&financial.profit_margins),
        revenue_growth: raw(&financial.revenue_growth),
        earnings_growth: raw(&financial.earnings_growth),
        dividend_yield: raw(&summary.dividend_yield),
        payout_ratio: raw(&summary.payout_ratio),
        debt_equity: raw(&financial.debt_to_equity),
        beta: raw(&summary.beta).or_else(|| raw(&stats.beta)),
        fcf,
    }
}

/// Parse a quoteSummary body into a record, surfacing provider-side errors
fn parse_quote_summary(ticker: &str, body: &str) -> Result<FundamentalsRecord, FetchError> {
    let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).map_err(|e| FetchError::Parse {
        ticker: ticker.to_string(),
        message: e.to_string(),
    })?;

    if let Some(error) = envelope.quote_summary.error {
        return Err(FetchError::Provider {
            ticker: ticker.to_string(),
            code: error.code.unwrap_or_else(|| "unknown".to_string()),
            description: error.description.unwrap_or_default(),
        });
    }

    envelope
        .quote_summary
        .result
        .and_then(|results| results.into_iter().next())
        .map(|result| into_record(ticker, result))
        .ok_or_else(|| FetchError::NotFound(ticker.to_string()))
}

/// Yahoo Finance quoteSummary client
pub struct YahooClient {
    client: Client,
    base_url: String,
    cookie_url: String,
    rate_limiter: ApiRateLimiter,
    crumb: OnceCell<Option<String>>,
}

impl YahooClient {
    /// Create a new Yahoo client
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; FundamentalScreener/0.1)")
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
            cookie_url: config.yahoo_cookie_url.clone(),
            rate_limiter: ApiRateLimiter::new(config.rate_limit_per_minute),
            crumb: OnceCell::new(),
        })
    }

    /// Session crumb, obtained once per client.
    ///
    /// A failed handshake is remembered as `None` and requests go out without a
    /// crumb; if Yahoo then rejects them, each ticker fails with a status error.
    async fn crumb(&self) -> Option<&str> {
        self.crumb
            .get_or_init(|| async {
                match self.request_crumb().await {
                    Ok(crumb) => {
                        debug!("Obtained Yahoo crumb");
                        Some(crumb)
                    }
                    Err(e) => {
                        warn!("Yahoo crumb handshake failed, continuing without crumb: {}", e);
                        None
                    }
                }
            })
            .await
            .as_deref()
    }

    async fn request_crumb(&self) -> anyhow::Result<String> {
        // Only the session cookie matters here, the response itself is usually a 404
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            debug!("Cookie bootstrap request failed: {}", e);
        }

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("getcrumb returned HTTP {}", response.status()));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(anyhow::anyhow!("getcrumb returned an unusable body"));
        }
        Ok(crumb)
    }

    /// Annual cash-flow timeseries, used when quoteSummary has no usable statement
    async fn fetch_timeseries_fcf(&self, ticker: &str, crumb: Option<&str>) -> Option<f64> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
            self.base_url, ticker
        );
        let period_end = Utc::now().timestamp().to_string();
        let period_start = TIMESERIES_PERIOD_START.to_string();
        let mut request = self.client.get(&url).query(&[
            ("symbol", ticker),
            ("type", CASHFLOW_TIMESERIES_TYPES),
            ("period1", period_start.as_str()),
            ("period2", period_end.as_str()),
        ]);
        if let Some(crumb) = crumb {
            request = request.query(&[("crumb", crumb)]);
        }

        debug!("GET {} for {}", url, ticker);
        let response = match request.send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Cash-flow timeseries for {} returned HTTP {}", ticker, response.status());
                return None;
            }
            Err(e) => {
                warn!("Cash-flow timeseries request for {} failed: {}", ticker, e);
                return None;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read cash-flow timeseries for {}: {}", ticker, e);
                return None;
            }
        };

        let fcf = parse_timeseries_fcf(&body);
        if fcf.is_none() {
            debug!("No complete cash-flow year in timeseries for {}", ticker);
        }
        fcf
    }
}

#[async_trait]
impl FundamentalsProvider for YahooClient {
    async fn fetch_fundamentals(&self, ticker: &str) -> Result<FundamentalsRecord, FetchError> {
        let crumb = self.crumb().await;
        self.rate_limiter.wait().await;

        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, ticker);
        let mut request = self.client.get(&url).query(&[("modules", QUOTE_SUMMARY_MODULES)]);
        if let Some(crumb) = crumb {
            request = request.query(&[("crumb", crumb)]);
        }

        debug!("GET {} for {}", url, ticker);
        let http_error = |source| FetchError::Http {
            ticker: ticker.to_string(),
            source,
        };
        let response = request.send().await.map_err(http_error)?;
        let status = response.status();
        let body = response.text().await.map_err(http_error)?;

        if !status.is_success() {
            // Yahoo wraps "not found" and similar in a quoteSummary error object
            return match parse_quote_summary(ticker, &body) {
                Err(provider @ FetchError::Provider { .. }) => Err(provider),
                _ => Err(FetchError::Status {
                    ticker: ticker.to_string(),
                    status: status.as_u16(),
                }),
            };
        }

        let mut record = parse_quote_summary(ticker, &body)?;
        if record.fcf.is_none() {
            record.fcf = self.fetch_timeseries_fcf(ticker, crumb).await;
        }
        Ok(record)
    }
}
