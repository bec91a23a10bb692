//! Markdown summary table of a screening run.

use chrono::{DateTime, Utc};

use crate::models::{ScoredRecord, NOT_AVAILABLE};
use crate::utils::{minute_timestamp, truncate_chars};

const NAME_WIDTH: usize = 20;

/// Escape characters that would break a Markdown table cell
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

/// Render ranked results as a Markdown document
pub fn render_markdown(results: &[ScoredRecord], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("# 📊 Fundamental Screening Results\n\n");
    out.push_str(&format!("Updated: {}\n\n", minute_timestamp(generated_at)));
    out.push_str("| # | Ticker | Name | Score | Type | Grade |\n");
    out.push_str("|---|--------|------|-------|------|-------|\n");

    for (i, scored) in results.iter().enumerate() {
        let types = scored.stock_types_str();
        let types = if types.is_empty() { NOT_AVAILABLE.to_string() } else { types };

        out.push_str(&format!(
            "| {} | {} | {} | {:.1} | {} | {} |\n",
            i + 1,
            escape_cell(scored.ticker()),
            escape_cell(&truncate_chars(&scored.fundamentals.name, NAME_WIDTH)),
            scored.total_score,
            escape_cell(&types),
            scored.grade().display(),
        ));
    }

    out
}
