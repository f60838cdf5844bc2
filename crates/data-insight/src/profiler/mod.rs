//! Dataset profiling.
//!
//! This module turns a freshly loaded DataFrame into:
//! - the [`StatsRecord`] (row count, column names, missing counts)
//! - a [`ColumnClassification`] (numeric / categorical / date-like)
//! - the mutated dataset, with date-like columns converted to datetimes

mod classification;
mod dates;
mod statistics;

use crate::error::Result;
use crate::types::{ColumnClassification, StatsRecord};
use polars::prelude::*;
use tracing::{debug, info};

use classification::classify_columns;
use dates::coerce_date_columns;
pub use statistics::{NumericSummary, correlation_matrix, most_frequent_value, pearson_correlation};

/// A profiled dataset, handed from stage to stage.
#[derive(Debug, Clone)]
pub struct DatasetProfile {
    pub stats: StatsRecord,
    pub classification: ColumnClassification,
    /// The dataset after date coercion.
    pub data: DataFrame,
}

/// Data profiler for analyzing dataset structure.
#[derive(Debug, Clone)]
pub struct DatasetProfiler {
    date_keyword: String,
}

impl Default for DatasetProfiler {
    fn default() -> Self {
        Self::new("date")
    }
}

impl DatasetProfiler {
    pub fn new(date_keyword: impl Into<String>) -> Self {
        Self {
            date_keyword: date_keyword.into(),
        }
    }

    /// Profile a dataset, taking ownership so date columns can be rewritten.
    ///
    /// Stats are taken before date coercion, so a date cell that fails to
    /// parse is not counted as missing.
    pub fn profile(&self, mut df: DataFrame) -> Result<DatasetProfile> {
        let stats = Self::stats(&df);
        let classification = self.classify(&df);

        info!(
            "Profiled {} rows x {} columns: {} numeric, {} categorical, {} date-like",
            stats.row_count,
            stats.column_names.len(),
            classification.numeric.len(),
            classification.categorical.len(),
            classification.date_like.len()
        );
        debug!("Column classification: {:?}", classification);

        coerce_date_columns(&mut df, &classification.date_like)?;

        Ok(DatasetProfile {
            stats,
            classification,
            data: df,
        })
    }

    /// Row count, ordered column names and per-column null counts.
    pub fn stats(df: &DataFrame) -> StatsRecord {
        let column_names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let missing_per_column = df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect();

        StatsRecord {
            row_count: df.height(),
            column_names,
            missing_per_column,
        }
    }

    /// Classify columns by name and dtype. Pure; safe to call repeatedly.
    pub fn classify(&self, df: &DataFrame) -> ColumnClassification {
        classify_columns(df, &self.date_keyword)
    }
}
