//! Descriptive statistics used by the insight and chart stages.

use crate::utils::is_temporal_dtype;
use indexmap::IndexMap;
use polars::prelude::*;

/// Mean, median, min and max of a numeric column, nulls ignored.
///
/// Every field is `None` when the column has no values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    pub fn from_series(series: &Series) -> PolarsResult<Self> {
        let values = series.cast(&DataType::Float64)?.drop_nulls();
        if values.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self {
            mean: values.mean(),
            median: values.median(),
            min: values.min::<f64>()?,
            max: values.max::<f64>()?,
        })
    }
}

/// Most frequent non-null value of a column, rendered as text.
///
/// Temporal values are rendered as calendar dates. Ties go to the value seen
/// first in row order. Returns `None` for a column without values.
pub fn most_frequent_value(series: &Series) -> PolarsResult<Option<String>> {
    let dtype = series.dtype();
    let keys = if is_temporal_dtype(dtype) && dtype != &DataType::Time {
        series.cast(&DataType::Date)?.cast(&DataType::String)?
    } else {
        series.cast(&DataType::String)?
    };

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in keys.str()?.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    Ok(best.map(|(value, _)| value.to_string()))
}

/// Pearson correlation over the rows where both values are present.
///
/// Returns `NaN` with fewer than two complete pairs or a constant input.
pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }

    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Square matrix of pairwise Pearson correlations, in input order.
pub fn correlation_matrix(columns: &[Vec<Option<f64>>]) -> Vec<Vec<f64>> {
    let n = columns.len();
    let mut matrix = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let r = pearson_correlation(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    matrix
}
