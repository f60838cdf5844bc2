//! Headline figures for front ends: date span, a running total and the
//! busiest day.
//!
//! These are approximations taken from the first numeric and first
//! date-like columns; they are not part of the JSON report.

use crate::error::{InsightError, Result};
use crate::insights::millis_range;
use crate::profiler::DatasetProfile;
use crate::utils::{epoch_millis, is_temporal_dtype, millis_to_date, optional_f64};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sum of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnTotal {
    pub column: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetHighlights {
    /// Earliest and latest calendar day of the first date-like column that
    /// has any valid value.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    /// Sum of the first numeric column; zero when it has no values.
    pub total: Option<ColumnTotal>,
    /// Day with the largest sum of the first numeric column. The earliest
    /// such day wins ties.
    pub top_day: Option<NaiveDate>,
}

impl DatasetHighlights {
    pub fn compute(profile: &DatasetProfile) -> Result<Self> {
        let df = &profile.data;
        let classification = &profile.classification;

        let mut date_range = None;
        for name in &classification.date_like {
            if let Some((lo, hi)) = millis_range(&column(df, name)?)?
                && let (Some(start), Some(end)) = (millis_to_date(lo), millis_to_date(hi))
            {
                date_range = Some((start, end));
                break;
            }
        }

        let first_numeric = classification.numeric.first();

        let total = match first_numeric {
            Some(name) => {
                let values = optional_f64(&column(df, name)?)?;
                Some(ColumnTotal {
                    column: name.clone(),
                    value: values.into_iter().flatten().sum(),
                })
            }
            None => None,
        };

        let dates = match classification.date_like.first() {
            Some(name) => Some(column(df, name)?),
            None => None,
        };
        let top_day = match (dates, first_numeric) {
            (Some(dates), Some(value_col)) if is_temporal_dtype(dates.dtype()) => {
                let days = epoch_millis(&dates)?;
                let values = optional_f64(&column(df, value_col)?)?;
                busiest_day(&days, &values)
            }
            _ => None,
        };

        Ok(Self {
            date_range,
            total,
            top_day,
        })
    }
}

/// Group `values` by the calendar day of `instants` and return the day with
/// the largest sum. Rows without a day are skipped; missing values add zero.
fn busiest_day(instants: &[Option<i64>], values: &[Option<f64>]) -> Option<NaiveDate> {
    let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (&instant, value) in instants.iter().zip(values) {
        if let Some(day) = instant.and_then(millis_to_date) {
            *sums.entry(day).or_insert(0.0) += value.unwrap_or(0.0);
        }
    }

    let mut best: Option<(NaiveDate, f64)> = None;
    for (day, sum) in sums {
        if best.is_none_or(|(_, top)| sum > top) {
            best = Some((day, sum));
        }
    }
    best.map(|(day, _)| day)
}

/// Two decimals with `,` between thousands, e.g. `12,345.60`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn column(df: &DataFrame, name: &str) -> Result<Series> {
    df.column(name)
        .map(|col| col.as_materialized_series().clone())
        .map_err(|_| InsightError::ColumnNotFound(name.to_string()))
}
