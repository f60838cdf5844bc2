//! Templated question/answer insights.
//!
//! One insight per numeric column, one for the first categorical column and
//! one for the first date-like column. Answers are plain strings.

use crate::error::{InsightError, Result};
use crate::profiler::{DatasetProfile, NumericSummary, most_frequent_value};
use crate::types::Insight;
use crate::utils::{epoch_millis, format_stat, is_temporal_dtype, millis_to_datetime};
use polars::prelude::*;
use tracing::debug;

/// Question asked of the first date-like column.
pub const DATE_RANGE_QUESTION: &str = "What’s the date range in your dataset?";

/// Placeholder for a value that does not exist.
pub const NOT_AVAILABLE: &str = "N/A";

const DATE_RANGE_SEPARATOR: &str = " → ";
const DATETIME_DISPLAY: &str = "%Y-%m-%d %H:%M:%S";

/// Builds [`Insight`]s from a [`DatasetProfile`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightSynthesizer;

impl InsightSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Numeric insights in column order, then the categorical one, then the
    /// date range.
    pub fn synthesize(&self, profile: &DatasetProfile) -> Result<Vec<Insight>> {
        let df = &profile.data;
        let classification = &profile.classification;
        let mut insights = Vec::with_capacity(classification.expected_insight_count());

        for name in &classification.numeric {
            let summary = NumericSummary::from_series(&column(df, name)?)?;
            insights.push(Insight::new(
                format!("What are the key stats for {name}?"),
                numeric_answer(&summary),
            ));
        }

        if let Some(name) = classification.categorical.first() {
            let mode = most_frequent_value(&column(df, name)?)?;
            insights.push(Insight::new(
                format!("What is the most frequent value in {name}?"),
                mode.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ));
        }

        if let Some(name) = classification.date_like.first() {
            let range = millis_range(&column(df, name)?)?;
            insights.push(Insight::new(DATE_RANGE_QUESTION, date_range_answer(range)));
        }

        debug!("Synthesized {} insights", insights.len());
        Ok(insights)
    }
}

/// `Mean = .., Median = .., Min = .., Max = ..`, two decimals, `NaN` when absent.
pub fn numeric_answer(summary: &NumericSummary) -> String {
    format!(
        "Mean = {}, Median = {}, Min = {}, Max = {}",
        format_stat(summary.mean),
        format_stat(summary.median),
        format_stat(summary.min),
        format_stat(summary.max)
    )
}

/// Earliest and latest instant of a temporal column, in epoch milliseconds.
///
/// A column that is not temporal has no instants.
pub fn millis_range(series: &Series) -> PolarsResult<Option<(i64, i64)>> {
    if !is_temporal_dtype(series.dtype()) {
        return Ok(None);
    }
    let millis = epoch_millis(series)?;
    let mut values = millis.into_iter().flatten();

    let Some(first) = values.next() else {
        return Ok(None);
    };
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Ok(Some((min, max)))
}

fn date_range_answer(range: Option<(i64, i64)>) -> String {
    let render = |ms: Option<i64>| {
        ms.and_then(millis_to_datetime)
            .map(|dt| dt.format(DATETIME_DISPLAY).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    };

    format!(
        "{}{DATE_RANGE_SEPARATOR}{}",
        render(range.map(|(lo, _)| lo)),
        render(range.map(|(_, hi)| hi))
    )
}

/// Shorten a date range answer to calendar dates, for display.
///
/// Anything that is not a date range answer comes back unchanged.
pub fn date_range_as_dates(answer: &str) -> String {
    let Some((start, end)) = answer.split_once(DATE_RANGE_SEPARATOR) else {
        return answer.to_string();
    };
    let day = |side: &str| side.split_whitespace().next().unwrap_or(side).to_string();
    format!("{}{DATE_RANGE_SEPARATOR}{}", day(start), day(end))
}

fn column(df: &DataFrame, name: &str) -> Result<Series> {
    df.column(name)
        .map(|col| col.as_materialized_series().clone())
        .map_err(|_| InsightError::ColumnNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::DatasetProfiler;
    use pretty_assertions::assert_eq;

    fn synthesize(df: DataFrame) -> Vec<Insight> {
        let profile = DatasetProfiler::default().profile(df).unwrap();
        InsightSynthesizer::new().synthesize(&profile).unwrap()
    }

    #[test]
    fn test_sales_scenario() {
        let df = df! {
            "date" => &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"],
            "revenue" => &[10i64, 20, 30, 40, 50],
            "region" => &["north", "south", "south", "east", "north"],
        }
        .unwrap();

        let insights = synthesize(df);
        assert_eq!(
            insights,
            vec![
                Insight::new(
                    "What are the key stats for revenue?",
                    "Mean = 30.00, Median = 30.00, Min = 10.00, Max = 50.00"
                ),
                Insight::new("What is the most frequent value in region?", "north"),
                Insight::new(
                    DATE_RANGE_QUESTION,
                    "2024-01-01 00:00:00 → 2024-01-05 00:00:00"
                ),
            ]
        );
    }

    #[test]
    fn test_empty_numeric_column_gives_nan() {
        let df = df! { "x" => &[None::<f64>, None] }.unwrap();
        let insights = synthesize(df);

        assert_eq!(
            insights[0].answer,
            "Mean = NaN, Median = NaN, Min = NaN, Max = NaN"
        );
    }

    #[test]
    fn test_no_date_column_means_no_date_insight() {
        let df = df! {
            "a" => &[1.0, 2.0],
            "b" => &[3i64, 4],
        }
        .unwrap();
        let insights = synthesize(df);

        assert_eq!(insights.len(), 2);
        assert!(insights.iter().all(|i| i.question != DATE_RANGE_QUESTION));
    }

    #[test]
    fn test_unparseable_dates_give_not_available() {
        let df = df! { "order_date" => &["soon", "later"] }.unwrap();
        let insights = synthesize(df);

        assert_eq!(insights, vec![Insight::new(DATE_RANGE_QUESTION, "N/A → N/A")]);
    }

    #[test]
    fn test_numeric_column_named_like_date() {
        let df = df! { "update_count" => &[1i64, 2, 3] }.unwrap();
        let insights = synthesize(df);

        assert_eq!(
            insights,
            vec![
                Insight::new(
                    "What are the key stats for update_count?",
                    "Mean = 2.00, Median = 2.00, Min = 1.00, Max = 3.00"
                ),
                Insight::new(DATE_RANGE_QUESTION, "N/A → N/A"),
            ]
        );
    }

    #[test]
    fn test_only_first_categorical_column() {
        let df = df! {
            "city" => &[None::<&str>, None],
            "region" => &["a", "b"],
        }
        .unwrap();
        let insights = synthesize(df);

        assert_eq!(
            insights,
            vec![Insight::new("What is the most frequent value in city?", "N/A")]
        );
    }

    #[test]
    fn test_date_range_as_dates() {
        assert_eq!(
            date_range_as_dates("2024-01-01 00:00:00 → 2024-01-05 12:30:00"),
            "2024-01-01 → 2024-01-05"
        );
        assert_eq!(date_range_as_dates("N/A → N/A"), "N/A → N/A");
        assert_eq!(date_range_as_dates("north"), "north");
    }
}
