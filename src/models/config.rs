use std::path::PathBuf;

/// Watchlist used when `CUSTOM_TICKERS` is unset or blank
pub const DEFAULT_WATCHLIST: [&str; 15] = [
    "AAPL", "GOOGL", "MSFT", "META", "AMZN",
    "UNH", "JNJ", "ABT",
    "KO", "PG", "WMT",
    "VZ", "T",
    "JPM", "BRK-B",
];

const DEFAULT_RESULTS_DIR: &str = "results";
const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
const DEFAULT_YAHOO_COOKIE_URL: &str = "https://fc.yahoo.com";

/// Configuration for a screening run
#[derive(Debug, Clone)]
pub struct Config {
    pub tickers: Vec<String>,
    pub results_dir: PathBuf,
    pub yahoo_base_url: String,
    pub yahoo_cookie_url: String,
    pub rate_limit_per_minute: u32,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers: Self::watchlist_from(None),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            yahoo_cookie_url: DEFAULT_YAHOO_COOKIE_URL.to_string(),
            rate_limit_per_minute: 60,
            http_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let custom_tickers = std::env::var("CUSTOM_TICKERS").ok();

        Ok(Config {
            tickers: Self::watchlist_from(custom_tickers.as_deref()),
            results_dir: std::env::var("RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_RESULTS_DIR)),
            yahoo_base_url: std::env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_BASE_URL.to_string()),
            yahoo_cookie_url: std::env::var("YAHOO_COOKIE_URL")
                .unwrap_or_else(|_| DEFAULT_YAHOO_COOKIE_URL.to_string()),
            rate_limit_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }

    /// Apply command-line overrides on top of the environment
    pub fn with_overrides(mut self, tickers: Option<&str>, results_dir: Option<PathBuf>) -> Self {
        if let Some(raw) = tickers {
            self.tickers = Self::watchlist_from(Some(raw));
        }
        if let Some(dir) = results_dir {
            self.results_dir = dir;
        }
        self
    }

    /// Parse a comma-separated ticker list.
    ///
    /// Entries are trimmed and upper-cased; empty entries are dropped. Falls back to
    /// [`DEFAULT_WATCHLIST`] when nothing usable remains. Duplicates are kept.
    pub fn watchlist_from(raw: Option<&str>) -> Vec<String> {
        let parsed: Vec<String> = raw
            .unwrap_or("")
            .split(',')
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();

        if parsed.is_empty() {
            DEFAULT_WATCHLIST.iter().map(|t| t.to_string()).collect()
        } else {
            parsed
        }
    }
}
