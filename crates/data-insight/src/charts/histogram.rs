//! Distribution histogram with a kernel density overlay.

use super::{BAR_COLOR, CURVE_COLOR, ChartStyle, draw_err};
use crate::error::Result;
use plotters::prelude::*;
use std::path::Path;
use tracing::warn;

/// Upper bound on the number of bins, whatever the data looks like.
const MAX_BINS: usize = 200;

/// Points sampled along the density curve.
const KDE_POINTS: usize = 200;

/// Bin edges and counts of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramBins {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Linear-interpolated quantile of sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Bin `values` with the "auto" rule: the narrower of the Freedman-Diaconis
/// and Sturges widths, falling back to Sturges when the IQR is zero.
///
/// Non-finite values are ignored. A constant column gets one bin spanning
/// `value ± 0.5`; a span too wide for `f64` gets no bins at all.
pub fn auto_bins(values: &[f64]) -> HistogramBins {
    let empty = HistogramBins {
        edges: Vec::new(),
        counts: Vec::new(),
    };

    let mut sorted = finite_values(values);
    if sorted.is_empty() {
        return empty;
    }
    sorted.sort_by(f64::total_cmp);
    let (lo, hi) = (sorted[0], sorted[sorted.len() - 1]);

    if hi == lo {
        return HistogramBins {
            edges: vec![lo - 0.5, lo + 0.5],
            counts: vec![sorted.len()],
        };
    }

    let range = hi - lo;
    if !range.is_finite() {
        return empty;
    }

    let n = sorted.len() as f64;
    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

    let bins = ((range / width).ceil() as usize).clamp(1, MAX_BINS);
    let step = range / bins as f64;

    let edges = (0..=bins).map(|i| lo + step * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for value in &sorted {
        let idx = (((value - lo) / step).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    HistogramBins { edges, counts }
}

fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Gaussian kernel density estimate with Scott's bandwidth, sampled over
/// `[lo, hi]`. `None` when fewer than two values or no spread.
pub fn kde_curve(values: &[f64], lo: f64, hi: f64, points: usize) -> Option<Vec<(f64, f64)>> {
    if values.len() < 2 || points < 2 || hi <= lo {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = variance.sqrt();
    if std == 0.0 || !std.is_finite() {
        return None;
    }

    let bandwidth = std * n.powf(-1.0 / 5.0);
    let norm = n * bandwidth * (2.0 * std::f64::consts::PI).sqrt();
    let step = (hi - lo) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                / norm;
            (x, density)
        })
        .collect();

    Some(curve)
}

/// Draw the histogram of `values` to `path` as PNG.
///
/// Non-finite values are left out. No values, or values that cannot be
/// binned, give an empty chart rather than an error.
pub(crate) fn render_histogram(
    path: &Path,
    column: &str,
    values: &[f64],
    style: ChartStyle,
) -> Result<()> {
    let chart_name = path.display().to_string();
    let err = |e| draw_err(&chart_name, e);

    let values = finite_values(values);
    let bins = auto_bins(&values);
    if bins.counts.is_empty() && !values.is_empty() {
        warn!("Column '{}' spans too wide a range to bin, drawing an empty histogram", column);
    }
    let (x_range, y_max) = match (bins.edges.first(), bins.edges.last()) {
        (Some(lo), Some(hi)) => (*lo..*hi, (bins.max_count() as f64 * 1.1).max(1.0)),
        _ => (0.0..1.0, 1.0),
    };

    // Density scaled to counts so it overlays the bars.
    let scale = values.len() as f64 * bins.bin_width();
    let curve = kde_curve(&values, x_range.start, x_range.end, KDE_POINTS).map(|points| {
        points
            .into_iter()
            .map(|(x, density)| (x, density * scale))
            .collect::<Vec<_>>()
    });

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if style.with_text {
        builder
            .caption(format!("Distribution of {column}"), ("sans-serif", 20))
            .x_label_area_size(35)
            .y_label_area_size(45);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(err)?;

    if style.with_text {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(column)
            .y_desc("Count")
            .draw()
            .map_err(err)?;
    }

    let bars: Vec<(f64, f64, f64)> = bins
        .counts
        .iter()
        .enumerate()
        .map(|(i, count)| (bins.edges[i], bins.edges[i + 1], *count as f64))
        .collect();

    chart
        .draw_series(bars.iter().map(|(left, right, count)| {
            Rectangle::new([(*left, 0.0), (*right, *count)], BAR_COLOR.mix(0.6).filled())
        }))
        .map_err(err)?;
    chart
        .draw_series(bars.iter().map(|(left, right, count)| {
            Rectangle::new([(*left, 0.0), (*right, *count)], CURVE_COLOR.stroke_width(1))
        }))
        .map_err(err)?;

    if let Some(curve) = curve {
        chart
            .draw_series(LineSeries::new(curve, CURVE_COLOR.stroke_width(2)))
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}
