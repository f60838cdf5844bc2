//! Integration tests for the data insight agent.
//!
//! These tests run the whole agent on fixture CSV files, writing artifacts
//! into temporary directories.

use data_insight::insights::DATE_RANGE_QUESTION;
use data_insight::reporting::read_report;
use data_insight::{
    AgentConfig, DataInsightAgent, DatasetProfiler, InsightError, ResultBundle, load_dataset,
};
use polars::prelude::DataType;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn agent_for(output_dir: &Path) -> DataInsightAgent {
    let config = AgentConfig::builder()
        .output_dir(output_dir)
        .chart_size(400, 300)
        .build()
        .expect("valid config");
    DataInsightAgent::new(config)
}

fn run_fixture(filename: &str) -> (TempDir, ResultBundle) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let bundle = agent_for(&tmp.path().join("outputs"))
        .run(fixtures_path().join(filename))
        .expect("Insight run failed");
    (tmp, bundle)
}

fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn questions(bundle: &ResultBundle) -> Vec<&str> {
    bundle.insights.iter().map(|i| i.question.as_str()).collect()
}

// ============================================================================
// Sales Scenario
// ============================================================================

#[test]
fn test_sales_scenario() {
    let (tmp, bundle) = run_fixture("sales.csv");

    assert_eq!(bundle.stats.row_count, 5);
    assert_eq!(bundle.stats.column_names, vec!["date", "revenue", "region"]);
    assert!(bundle.stats.missing_per_column.values().all(|&n| n == 0));

    assert_eq!(file_names(&bundle.plots), vec!["hist_revenue.png"]);
    assert!(bundle.plots.iter().all(|p| p.exists()));
    assert!(!tmp.path().join("outputs/correlation_heatmap.png").exists());

    assert_eq!(
        questions(&bundle),
        vec![
            "What are the key stats for revenue?",
            "What is the most frequent value in region?",
            DATE_RANGE_QUESTION,
        ]
    );
    assert_eq!(
        bundle.insights[0].answer,
        "Mean = 30.00, Median = 30.00, Min = 10.00, Max = 50.00"
    );
    assert_eq!(bundle.insights[1].answer, "north");
    assert_eq!(
        bundle.insights[2].answer,
        "2024-01-01 00:00:00 → 2024-01-05 00:00:00"
    );

    assert_eq!(bundle.report_json, tmp.path().join("outputs/report.json"));
}

#[test]
fn test_sales_highlights() {
    let tmp = tempfile::tempdir().unwrap();
    let (bundle, highlights) = agent_for(tmp.path())
        .run_with_highlights(fixtures_path().join("sales.csv"))
        .unwrap();

    let total = highlights.total.expect("revenue total");
    assert_eq!(total.column, "revenue");
    assert_eq!(total.value, 150.0);
    assert_eq!(
        highlights.top_day.map(|d| d.to_string()),
        Some("2024-01-05".to_string())
    );
    assert_eq!(
        highlights.date_range.map(|(a, b)| (a.to_string(), b.to_string())),
        Some(("2024-01-01".to_string(), "2024-01-05".to_string()))
    );
    assert_eq!(bundle.stats.row_count, 5);
}

// ============================================================================
// Chart and Insight Counts
// ============================================================================

#[test]
fn test_many_numeric_columns() {
    let (_tmp, bundle) = run_fixture("sensors.csv");

    // One fully-empty row is dropped
    assert_eq!(bundle.stats.row_count, 5);
    assert_eq!(bundle.stats.missing_per_column["humidity"], 1);
    assert_eq!(bundle.stats.missing_per_column["wind_speed"], 1);
    assert_eq!(bundle.stats.missing_per_column["status"], 1);

    assert_eq!(
        file_names(&bundle.plots),
        vec![
            "hist_temperature.png",
            "hist_humidity.png",
            "hist_pressure.png",
            "correlation_heatmap.png",
        ]
    );

    // 4 numeric + 1 categorical, no date column
    assert_eq!(bundle.insights.len(), 5);
    assert!(!questions(&bundle).contains(&DATE_RANGE_QUESTION));
    assert_eq!(
        bundle.insights[4].question,
        "What is the most frequent value in sensor?"
    );
    assert_eq!(bundle.insights[4].answer, "A");
}

#[test]
fn test_insight_count_matches_classification() {
    for fixture in [
        "sales.csv",
        "sensors.csv",
        "orders.csv",
        "empty_numeric.csv",
        "events.csv",
        "quoted.csv",
        "non_finite.csv",
    ] {
        let path = fixtures_path().join(fixture);
        let config = AgentConfig::default();
        let df = load_dataset(&path, &config.null_markers).unwrap();
        let classification = DatasetProfiler::default().classify(&df);

        let (_tmp, bundle) = run_fixture(fixture);
        assert_eq!(
            bundle.insights.len(),
            classification.expected_insight_count(),
            "fixture {fixture}"
        );

        let numeric = classification.numeric.len();
        let expected_plots = numeric.min(3) + usize::from(numeric >= 2);
        assert_eq!(bundle.plots.len(), expected_plots, "fixture {fixture}");
    }
}

#[test]
fn test_max_histograms_is_configurable() {
    let tmp = tempfile::tempdir().unwrap();
    let config = AgentConfig::builder()
        .output_dir(tmp.path())
        .max_histograms(1)
        .build()
        .unwrap();

    let bundle = DataInsightAgent::new(config)
        .run(fixtures_path().join("sensors.csv"))
        .unwrap();
    assert_eq!(
        file_names(&bundle.plots),
        vec!["hist_temperature.png", "correlation_heatmap.png"]
    );
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_all_empty_numeric_columns() {
    let (_tmp, bundle) = run_fixture("empty_numeric.csv");

    assert_eq!(bundle.stats.row_count, 0);
    assert_eq!(bundle.stats.column_names, vec!["a", "b"]);
    assert_eq!(bundle.insights.len(), 2);
    for insight in &bundle.insights {
        assert_eq!(
            insight.answer,
            "Mean = NaN, Median = NaN, Min = NaN, Max = NaN"
        );
    }
    assert_eq!(
        file_names(&bundle.plots),
        vec!["hist_a.png", "hist_b.png", "correlation_heatmap.png"]
    );
}

#[test]
fn test_mixed_date_formats() {
    let (_tmp, bundle) = run_fixture("orders.csv");

    assert_eq!(bundle.stats.row_count, 4);
    assert_eq!(
        questions(&bundle),
        vec![
            "What are the key stats for amount?",
            "What is the most frequent value in channel?",
            DATE_RANGE_QUESTION,
        ]
    );
    assert_eq!(
        bundle.insights[2].answer,
        "2024-03-01 10:15:00 → 2024-03-04 00:00:00"
    );
    // "Order Date" is date-like, so it is neither charted nor categorical
    assert_eq!(file_names(&bundle.plots), vec!["hist_amount.png"]);
}

#[test]
fn test_iso_strings_without_date_name_stay_categorical() {
    let (_tmp, bundle) = run_fixture("events.csv");

    let df = load_dataset(
        &fixtures_path().join("events.csv"),
        &AgentConfig::default().null_markers,
    )
    .unwrap();
    assert_eq!(df.column("when").unwrap().dtype(), &DataType::String);

    assert_eq!(
        questions(&bundle),
        vec![
            "What are the key stats for count?",
            "What is the most frequent value in when?",
        ]
    );
    assert_eq!(bundle.insights[1].answer, "2024-01-02");
    assert_eq!(file_names(&bundle.plots), vec!["hist_count.png"]);
}

#[test]
fn test_fully_quoted_file() {
    let (_tmp, bundle) = run_fixture("quoted.csv");

    // The all-empty quoted row is dropped before counting
    assert_eq!(bundle.stats.row_count, 3);
    assert_eq!(bundle.stats.missing_per_column["id"], 0);
    assert_eq!(bundle.stats.missing_per_column["price"], 1);
    assert_eq!(bundle.stats.missing_per_column["city"], 0);

    assert_eq!(
        questions(&bundle),
        vec![
            "What are the key stats for id?",
            "What are the key stats for price?",
            "What is the most frequent value in city?",
        ]
    );
    assert_eq!(
        bundle.insights[1].answer,
        "Mean = 10.75, Median = 10.75, Min = 9.50, Max = 12.00"
    );
    assert_eq!(bundle.insights[2].answer, "Oslo");
    assert_eq!(
        file_names(&bundle.plots),
        vec!["hist_id.png", "hist_price.png", "correlation_heatmap.png"]
    );
}

#[test]
fn test_infinite_values_still_chart() {
    let (_tmp, bundle) = run_fixture("non_finite.csv");

    assert_eq!(
        file_names(&bundle.plots),
        vec!["hist_a.png", "hist_b.png", "correlation_heatmap.png"]
    );
    assert!(bundle.plots.iter().all(|p| p.exists()));
}

#[test]
fn test_missing_input_file() {
    let tmp = tempfile::tempdir().unwrap();
    let err = agent_for(tmp.path())
        .run(fixtures_path().join("no_such_file.csv"))
        .unwrap_err();

    assert!(matches!(err, InsightError::FileNotFound(_)));
    assert!(err.is_input_error());
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_round_trip() {
    let (_tmp, bundle) = run_fixture("sensors.csv");

    let report = read_report(&bundle.report_json).unwrap();
    assert_eq!(report.stats.row_count, bundle.stats.row_count);
    assert_eq!(report.stats.column_names, bundle.stats.column_names);
    assert_eq!(
        report.insights.iter().map(|i| &i.question).collect::<Vec<_>>(),
        bundle.insights.iter().map(|i| &i.question).collect::<Vec<_>>()
    );
}

#[test]
fn test_rerun_overwrites_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    let agent = agent_for(tmp.path());

    let first = agent.run(fixtures_path().join("sales.csv")).unwrap();
    let second = agent.run(fixtures_path().join("sales.csv")).unwrap();

    assert_eq!(first.plots, second.plots);
    assert_eq!(first.report_json, second.report_json);

    let entries = fs::read_dir(tmp.path()).unwrap().count();
    assert_eq!(entries, 2);
}

#[test]
fn test_bundle_serializes() {
    let (_tmp, bundle) = run_fixture("sales.csv");

    let value = serde_json::to_value(&bundle).unwrap();
    assert_eq!(value["stats"]["rows"], 5);
    assert_eq!(value["plots"].as_array().unwrap().len(), 1);
    assert!(value["report_json"].as_str().unwrap().ends_with("report.json"));
}
