//! Shared helpers for dtype handling, date conversion and file naming.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for classification purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date, datetime or time types
    Temporal,
    /// Boolean type
    Boolean,
    /// String/categorical type
    Text,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a date/time type.
#[inline]
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_temporal_dtype(dtype) {
        DtypeCategory::Temporal
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

/// Whether a column name marks the column as date-like.
pub fn is_date_like_name(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

// =============================================================================
// Value Extraction
// =============================================================================

/// Non-null values of a numeric column as `f64`.
pub fn non_null_f64(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().flatten().collect())
}

/// All values of a numeric column as `Option<f64>`, nulls preserved.
pub fn optional_f64(series: &Series) -> PolarsResult<Vec<Option<f64>>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Values of a temporal column as epoch milliseconds, nulls preserved.
pub fn epoch_millis(series: &Series) -> PolarsResult<Vec<Option<i64>>> {
    let datetimes = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    let physical = datetimes.cast(&DataType::Int64)?;
    Ok(physical.i64()?.into_iter().collect())
}

/// Convert epoch milliseconds to a naive UTC datetime.
pub fn millis_to_datetime(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.naive_utc())
}

/// Convert epoch milliseconds to a calendar date.
pub fn millis_to_date(ms: i64) -> Option<NaiveDate> {
    millis_to_datetime(ms).map(|dt| dt.date())
}

/// Render a statistic with two decimals; missing values read as `NaN`.
pub fn format_stat(value: Option<f64>) -> String {
    format!("{:.2}", value.unwrap_or(f64::NAN))
}

// =============================================================================
// File Naming
// =============================================================================

/// Make a column name safe to embed in a file name.
///
/// Path separators and characters rejected by common file systems become `_`.
pub fn sanitize_file_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.trim().is_empty() || cleaned == "." || cleaned == ".." {
        "column".to_string()
    } else {
        cleaned
    }
}
