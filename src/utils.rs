use chrono::{DateTime, Utc};

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Keep at most `max` characters (not bytes), so multi-byte names never split
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Date stamp used in dated report file names, e.g. `2025-08-19`
pub fn datestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}

/// Minute-precision UTC timestamp shown in the Markdown report
pub fn minute_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}
