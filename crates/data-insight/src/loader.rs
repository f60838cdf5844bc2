//! CSV loading.
//!
//! Reads the whole file with Polars, scanning every row for schema inference,
//! and removes rows in which every field is missing.

use crate::error::{InsightError, Result, ResultExt};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Load a CSV file into a DataFrame.
///
/// Empty fields, quoted or not, and any of `null_markers` are read as null.
/// Quoted numbers are read as numbers. A column holding only nulls in a file
/// with data rows is typed `Float64`, so an all-missing column still counts
/// as numeric. Fully-empty rows are dropped afterwards.
pub fn load_dataset(path: &Path, null_markers: &[String]) -> Result<DataFrame> {
    if !path.exists() {
        return Err(InsightError::FileNotFound(path.to_path_buf()));
    }

    let null_values = (!null_markers.is_empty()).then(|| {
        NullValues::AllColumns(
            null_markers
                .iter()
                .map(|marker| PlSmallStr::from(marker.as_str()))
                .collect(),
        )
    });

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(null_values),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Failed to open CSV '{}'", path.display()))?
        .finish()
        .context(format!("Failed to parse CSV '{}'", path.display()))?;

    debug!("Parsed {:?} (rows, columns) from {}", df.shape(), path.display());

    let df = retype_string_columns(df)?;
    drop_empty_rows(df)
}

/// Retype text columns the way a spreadsheet reader would.
///
/// Zero-length cells (a quoted `""`) become null. A column whose remaining
/// values all read as integers becomes `Int64`, or `Float64` when they all
/// read as numbers. A column left without values is typed `Float64`.
fn retype_string_columns(mut df: DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df);
    }

    let retyped: Vec<Series> = df
        .get_columns()
        .iter()
        .map(|col| col.as_materialized_series())
        .filter(|series| series.dtype() == &DataType::String)
        .map(retype_string_series)
        .collect::<PolarsResult<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    for series in retyped {
        debug!("Column '{}' read as {}", series.name(), series.dtype());
        df.with_column(series)?;
    }

    Ok(df)
}

/// The retyped column, or `None` when it is already in its final form.
fn retype_string_series(series: &Series) -> PolarsResult<Option<Series>> {
    let name = series.name().clone();
    let cells: Vec<Option<&str>> = series
        .str()?
        .into_iter()
        .map(|cell| cell.filter(|value| !value.is_empty()))
        .collect();

    if cells.iter().all(Option::is_none) {
        return Ok(Some(Series::full_null(name, cells.len(), &DataType::Float64)));
    }

    if let Some(ints) = parse_cells(&cells, |value| value.parse::<i64>().ok()) {
        return Ok(Some(Series::new(name, ints)));
    }
    if let Some(floats) = parse_cells(&cells, |value| value.parse::<f64>().ok()) {
        return Ok(Some(Series::new(name, floats)));
    }

    let emptied = cells.iter().filter(|cell| cell.is_none()).count() > series.null_count();
    Ok(emptied.then(|| Series::new(name, cells)))
}

/// Parse every present cell, or give up on the first one that does not parse.
fn parse_cells<T>(
    cells: &[Option<&str>],
    parse: impl Fn(&str) -> Option<T>,
) -> Option<Vec<Option<T>>> {
    cells
        .iter()
        .map(|cell| match cell {
            Some(value) => parse(value.trim()).map(Some),
            None => Some(None),
        })
        .collect()
}

/// Remove rows where every column is null.
pub fn drop_empty_rows(df: DataFrame) -> Result<DataFrame> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(df);
    }

    let mut keep = BooleanChunked::full("keep".into(), false, df.height());
    for col in df.get_columns() {
        let has_value = col.as_materialized_series().is_not_null();
        keep = &keep | &has_value;
    }

    let before = df.height();
    let df = df.filter(&keep)?;
    if df.height() < before {
        debug!("Dropped {} fully-empty rows", before - df.height());
    }

    Ok(df)
}
