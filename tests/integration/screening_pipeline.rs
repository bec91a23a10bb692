//! End-to-end screening with a stub provider: fetch, score, rank, write, read back

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use fundamental_screener::models::{Grade, StockType};
use fundamental_screener::report::{dated_csv_name, read_results_csv, write_reports};
use fundamental_screener::screener::run_screener;

use crate::common::logging::{log_test_data, log_test_step};
use crate::common::{test_data, StubProvider};

fn watchlist(tickers: &[&str]) -> Vec<String> {
    tickers.iter().map(|t| t.to_string()).collect()
}

fn stub() -> StubProvider {
    StubProvider::new(vec![
        test_data::distressed_cyclical("DRL"),
        test_data::defensive_payer("FOOD"),
        test_data::quality_compounder("QC"),
    ])
}

#[test_log::test(tokio::test)]
async fn test_ranking_with_failed_tickers() {
    log_test_step("Screening a mixed watchlist");

    let tickers = watchlist(&["MISS1", "DRL", "FOOD", "MISS2", "QC"]);
    let run = run_screener(&stub(), &tickers).await;
    log_test_data("Run", &run);

    assert_eq!(run.results.len(), tickers.len());
    assert_eq!(run.fetched, 3);
    assert_eq!(run.failed, 2);

    let order: Vec<&str> = run.results.iter().map(|r| r.ticker()).collect();
    assert_eq!(order, vec!["QC", "FOOD", "DRL", "MISS1", "MISS2"]);

    let totals: Vec<f64> = run.results.iter().map(|r| r.total_score).collect();
    assert_eq!(totals, vec![96.0, 57.0, 13.0, 7.0, 7.0]);

    let grades: Vec<Grade> = run.results.iter().map(|r| r.grade()).collect();
    assert_eq!(
        grades,
        vec![Grade::StronglyWatch, Grade::Neutral, Grade::Avoid, Grade::Avoid, Grade::Avoid]
    );

    for missing in &run.results[3..] {
        assert_eq!(missing.stock_types, vec![StockType::Balanced]);
        assert_eq!(missing.fundamentals.sector, "N/A");
        assert_eq!(missing.scores.safety, 7.0);
    }
}

#[test_log::test(tokio::test)]
async fn test_reports_round_trip() {
    log_test_step("Writing and reading back reports");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("results");
    let now = Utc.with_ymd_and_hms(2025, 8, 19, 21, 47, 12).unwrap();

    let tickers = watchlist(&["FOOD", "QC", "GONE"]);
    let run = run_screener(&stub(), &tickers).await;
    let paths = write_reports(&out, &run.results, now).expect("Failed to write reports");

    assert_eq!(paths.dated_csv, out.join("screening_2025-08-19.csv"));
    assert_eq!(dated_csv_name(now), "screening_2025-08-19.csv");

    let dated = std::fs::read_to_string(&paths.dated_csv).unwrap();
    let latest = std::fs::read_to_string(&paths.latest_csv).unwrap();
    assert_eq!(dated, latest);

    let rows = read_results_csv(&paths.latest_csv).expect("Failed to read CSV");
    assert_eq!(rows.len(), 3);

    let qc = &rows[0];
    let expected = &run.results[0];
    assert_eq!(qc.ticker, "QC");
    assert_eq!(qc.name, "QC Holdings");
    assert_eq!(qc.stock_types_str, "growth | value | moat | dividend");
    assert_eq!(qc.total_score, expected.total_score);
    assert_eq!(qc.score_cashflow, expected.scores.cashflow);
    assert_eq!(qc.pe, expected.fundamentals.pe);
    assert_eq!(qc.roe, expected.fundamentals.roe);
    assert_eq!(qc.market_cap, expected.fundamentals.market_cap);

    let gone = &rows[2];
    assert_eq!(gone.ticker, "GONE");
    assert_eq!(gone.total_score, 7.0);
    assert_eq!(gone.price, None);
    assert_eq!(gone.stock_types_str, "balanced");

    let markdown = std::fs::read_to_string(&paths.latest_markdown).unwrap();
    assert!(markdown.contains("Updated: 2025-08-19 21:47 UTC"));
    assert!(markdown.contains("| 1 | QC | QC Holdings | 96.0 |"));
    assert!(markdown.contains("| 2 | FOOD | FOOD Foods | 57.0 | dividend \\| defensive | ⭐ neutral |"));
    assert!(markdown.contains("| 3 | GONE | GONE | 7.0 | balanced | ❌ avoid |"));
}

#[test_log::test(tokio::test)]
async fn test_rerun_overwrites_latest() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let now = Utc.with_ymd_and_hms(2025, 8, 20, 8, 0, 0).unwrap();

    let first = run_screener(&stub(), &watchlist(&["QC", "FOOD"])).await;
    write_reports(dir.path(), &first.results, now).unwrap();

    let second = run_screener(&stub(), &watchlist(&["DRL"])).await;
    let paths = write_reports(dir.path(), &second.results, now).unwrap();

    let rows = read_results_csv(&paths.latest_csv).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ticker, "DRL");
}
