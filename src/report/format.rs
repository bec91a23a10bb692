//! Plain-text summary table for the terminal.

use crate::models::ScoredRecord;
use crate::utils::truncate_chars;

/// Format ranked results as a fixed-width table
pub fn format_summary_table(results: &[ScoredRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} {:<8} {:<20} {:>6} {:>5} {:>5} {:>5} {:>5}  {:<30} {}\n",
        "#", "ticker", "name", "total", "val", "prof", "cf", "safe", "types", "grade"
    ));
    out.push_str(&format!("{}\n", "-".repeat(110)));

    for (i, r) in results.iter().enumerate() {
        let line = format!(
            "{:>3} {:<8} {:<20} {:>6.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1}  {:<30} {}",
            i + 1,
            r.ticker(),
            truncate_chars(&r.fundamentals.name, 20),
            r.total_score,
            r.scores.valuation,
            r.scores.profitability,
            r.scores.cashflow,
            r.scores.safety,
            r.stock_types_str(),
            r.grade().display(),
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
