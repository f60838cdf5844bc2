//! Data Insight Library
//!
//! Automated first-look analysis of a CSV file, built with Rust, Polars and
//! Plotters.
//!
//! # Overview
//!
//! One call to [`DataInsightAgent::run`] takes a CSV path through four stages:
//!
//! - **Profiling**: row count, column names, missing values per column, and a
//!   numeric / categorical / date-like classification of every column
//! - **Charts**: histograms for the first numeric columns and a correlation
//!   heatmap when there are two or more
//! - **Insights**: templated questions answered from the data
//! - **Report**: `{stats, insights}` written as pretty-printed JSON
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use data_insight::{AgentConfig, DataInsightAgent};
//!
//! let config = AgentConfig::builder()
//!     .output_dir("outputs")
//!     .max_histograms(3)
//!     .build()?;
//!
//! let bundle = DataInsightAgent::new(config).run("data/sales.csv")?;
//!
//! println!("Rows: {}", bundle.stats.row_count);
//! for insight in &bundle.insights {
//!     println!("{} {}", insight.question, insight.answer);
//! }
//! println!("Report: {}", bundle.report_json.display());
//! ```
//!
//! # Output
//!
//! Everything lands in the configured output directory (default `outputs`),
//! overwriting the previous run:
//!
//! - `hist_{column}.png` for up to `max_histograms` numeric columns
//! - `correlation_heatmap.png` when there are at least two numeric columns
//! - `report.json`

pub mod agent;
pub mod artifacts;
pub mod charts;
pub mod config;
pub mod error;
pub mod highlights;
pub mod insights;
pub mod loader;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use agent::DataInsightAgent;
pub use artifacts::ArtifactSink;
pub use charts::{ChartGenerator, ChartStyle};
pub use config::{AgentConfig, AgentConfigBuilder, ConfigValidationError, DEFAULT_NULL_MARKERS};
pub use error::{InsightError, Result as InsightResult, ResultExt};
pub use highlights::{ColumnTotal, DatasetHighlights};
pub use insights::InsightSynthesizer;
pub use loader::load_dataset;
pub use profiler::{DatasetProfile, DatasetProfiler, NumericSummary};
pub use reporting::ReportWriter;
pub use types::{ColumnClassification, Insight, Report, ResultBundle, StatsRecord};
