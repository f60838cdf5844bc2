//! Date coercion for date-like columns.

use crate::error::{InsightError, Result};
use crate::utils::{is_numeric_dtype, is_temporal_dtype};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, warn};

/// Date-time layouts tried in order after RFC 3339.
const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%B %d, %Y",
];

/// The representation every date-like column ends up in.
pub(crate) fn datetime_dtype() -> DataType {
    DataType::Datetime(TimeUnit::Milliseconds, None)
}

/// Parse one cell into epoch milliseconds (UTC).
pub(crate) fn parse_datetime_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
    })
}

/// Convert a column to `Datetime(ms)`; cells that do not parse become null.
pub(crate) fn coerce_to_datetime(series: &Series) -> PolarsResult<Series> {
    if is_temporal_dtype(series.dtype()) && series.dtype() != &DataType::Time {
        return series.cast(&datetime_dtype());
    }

    let text = series.cast(&DataType::String)?;
    let millis: Vec<Option<i64>> = text
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse_datetime_millis))
        .collect();

    Series::new(series.name().clone(), millis).cast(&datetime_dtype())
}

/// Replace every listed column in `df` with its datetime form.
///
/// Numeric columns are left as they are: they stay numeric whatever their name.
pub(crate) fn coerce_date_columns(df: &mut DataFrame, date_like: &[String]) -> Result<()> {
    for name in date_like {
        let series = df
            .column(name)
            .map_err(|_| InsightError::ColumnNotFound(name.clone()))?
            .as_materialized_series()
            .clone();

        if is_numeric_dtype(series.dtype()) {
            warn!("Column '{}' is named like a date but holds numbers, not parsing it", name);
            continue;
        }

        let coerced = coerce_to_datetime(&series)?;
        let unparsed = coerced.null_count().saturating_sub(series.null_count());
        if unparsed > 0 {
            debug!("Column '{}': {} values are not dates, set to null", name, unparsed);
        }

        df.with_column(coerced)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_datetime_millis("2024-01-01"), Some(1_704_067_200_000));
        assert_eq!(parse_datetime_millis(" 2024-01-01 "), Some(1_704_067_200_000));
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = Some(1_704_112_245_000);
        assert_eq!(parse_datetime_millis("2024-01-01 12:30:45"), expected);
        assert_eq!(parse_datetime_millis("2024-01-01T12:30:45"), expected);
        assert_eq!(parse_datetime_millis("2024-01-01T12:30:45Z"), expected);
        assert_eq!(parse_datetime_millis("2024-01-01T14:30:45+02:00"), expected);
    }

    #[test]
    fn test_parse_us_and_named_month() {
        assert_eq!(parse_datetime_millis("01/31/2024"), parse_datetime_millis("2024-01-31"));
        assert_eq!(parse_datetime_millis("Jan 31, 2024"), parse_datetime_millis("2024-01-31"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_datetime_millis("not a date"), None);
        assert_eq!(parse_datetime_millis("2024-13-45"), None);
        assert_eq!(parse_datetime_millis(""), None);
    }

    #[test]
    fn test_coerce_string_column() {
        let series = Series::new("date".into(), &[Some("2024-01-02"), Some("oops"), None]);
        let coerced = coerce_to_datetime(&series).unwrap();

        assert_eq!(coerced.dtype(), &datetime_dtype());
        assert_eq!(coerced.null_count(), 2);
        assert_eq!(coerced.name().as_str(), "date");
    }

    #[test]
    fn test_coerce_date_columns_in_place() {
        let mut df = df! {
            "ship_date" => &["2024-03-01", "2024-03-05"],
            "qty" => &[1i64, 2],
        }
        .unwrap();

        coerce_date_columns(&mut df, &["ship_date".to_string()]).unwrap();

        assert_eq!(df.column("ship_date").unwrap().dtype(), &datetime_dtype());
        assert_eq!(df.column("qty").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.get_column_names()[0].as_str(), "ship_date");
    }

    #[test]
    fn test_numeric_date_like_column_is_kept() {
        let mut df = df! { "update_count" => &[3i64, 5] }.unwrap();
        coerce_date_columns(&mut df, &["update_count".to_string()]).unwrap();

        let col = df.column("update_count").unwrap();
        assert_eq!(col.dtype(), &DataType::Int64);
        assert_eq!(col.null_count(), 0);
    }

    #[test]
    fn test_coerce_missing_column() {
        let mut df = df! { "a" => &[1i64] }.unwrap();
        let err = coerce_date_columns(&mut df, &["date".to_string()]).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }
}
