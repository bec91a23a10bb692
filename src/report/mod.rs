//! Report output for a screening run.
//!
//! - results CSV, dated and `latest` (`csv_export`)
//! - Markdown ranking table (`markdown`)
//! - terminal summary table (`format`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::ScoredRecord;
use crate::utils::datestamp;

pub mod csv_export;
pub mod format;
pub mod markdown;

pub use csv_export::{read_results_csv, write_results_csv, ResultRow};
pub use format::format_summary_table;
pub use markdown::render_markdown;

pub const LATEST_CSV: &str = "latest.csv";
pub const LATEST_MARKDOWN: &str = "latest.md";

/// Files written by [`write_reports`]
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub dated_csv: PathBuf,
    pub latest_csv: PathBuf,
    pub latest_markdown: PathBuf,
}

/// Dated snapshot file name, e.g. `screening_2025-08-19.csv`
pub fn dated_csv_name(now: DateTime<Utc>) -> String {
    format!("screening_{}.csv", datestamp(now))
}

/// Write all report artifacts into `dir`, creating it if needed
pub fn write_reports(dir: &Path, results: &[ScoredRecord], now: DateTime<Utc>) -> Result<ReportPaths> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory '{}'", dir.display()))?;

    let paths = ReportPaths {
        dated_csv: dir.join(dated_csv_name(now)),
        latest_csv: dir.join(LATEST_CSV),
        latest_markdown: dir.join(LATEST_MARKDOWN),
    };

    write_results_csv(&paths.dated_csv, results)?;
    write_results_csv(&paths.latest_csv, results)?;

    std::fs::write(&paths.latest_markdown, render_markdown(results, now))
        .with_context(|| format!("Failed to write '{}'", paths.latest_markdown.display()))?;

    info!("💾 Results saved to {}", dir.display());
    Ok(paths)
}
