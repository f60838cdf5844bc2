//! Chart generation.
//!
//! Renders PNG charts for the numeric columns of a profiled dataset:
//! - a histogram with density overlay for each of the first N numeric columns
//! - an annotated correlation heatmap when there are at least two
//!
//! Paths come back in render order, histograms first.

mod heatmap;
mod histogram;

pub use heatmap::{annotation, coolwarm};
pub use histogram::{HistogramBins, auto_bins, kde_curve};

use crate::artifacts::ArtifactSink;
use crate::config::AgentConfig;
use crate::error::{InsightError, Result};
use crate::profiler::correlation_matrix;
use crate::utils::{non_null_f64, optional_f64};
use plotters::prelude::*;
use polars::prelude::*;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub(crate) const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);
pub(crate) const CURVE_COLOR: RGBColor = RGBColor(70, 130, 180);

/// Pixel size of a chart and whether text can be drawn on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// False when no usable font is installed; charts are drawn without
    /// titles, labels or annotations.
    pub with_text: bool,
}

impl ChartStyle {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            with_text: fonts_available(),
        }
    }
}

pub(super) fn draw_err<E: Display>(chart: &str, e: E) -> InsightError {
    InsightError::render(chart, e)
}

/// Whether plotters can lay out text with the system fonts.
pub fn fonts_available() -> bool {
    ("sans-serif", 12).into_font().box_size("Ag").is_ok()
}

/// Renders the chart set of a run into an [`ArtifactSink`].
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    sink: ArtifactSink,
    style: ChartStyle,
    max_histograms: usize,
}

impl ChartGenerator {
    pub fn new(sink: ArtifactSink, style: ChartStyle, max_histograms: usize) -> Self {
        Self {
            sink,
            style,
            max_histograms,
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            ArtifactSink::from_config(config),
            ChartStyle::new(config.chart_width, config.chart_height),
            config.max_histograms,
        )
    }

    /// Render histograms for the first `max_histograms` of `numeric`, then
    /// the heatmap over all of `numeric` when it names two or more columns.
    ///
    /// Every path returned exists on disk.
    pub fn generate(&self, df: &DataFrame, numeric: &[String]) -> Result<Vec<PathBuf>> {
        self.sink.ensure_dir()?;
        if !self.style.with_text {
            warn!("No usable font found, charts will be drawn without text");
        }

        let mut plots = Vec::new();

        for name in numeric.iter().take(self.max_histograms) {
            let series = column_series(df, name)?;
            let values = non_null_f64(&series)?;
            if values.is_empty() {
                debug!("Column '{}' has no values, drawing an empty histogram", name);
            }

            let path = self.sink.histogram_path(name);
            histogram::render_histogram(&path, name, &values, self.style)?;
            info!("Saved histogram for '{}' to {}", name, path.display());
            plots.push(path);
        }

        if numeric.len() >= 2 {
            let columns = numeric
                .iter()
                .map(|name| Ok(optional_f64(&column_series(df, name)?)?))
                .collect::<Result<Vec<_>>>()?;
            let matrix = correlation_matrix(&columns);

            let path = self.sink.heatmap_path();
            heatmap::render_heatmap(&path, numeric, &matrix, self.style)?;
            info!(
                "Saved {}x{} correlation heatmap to {}",
                numeric.len(),
                numeric.len(),
                path.display()
            );
            plots.push(path);
        }

        Ok(plots)
    }
}

fn column_series(df: &DataFrame, name: &str) -> Result<Series> {
    df.column(name)
        .map(|col| col.as_materialized_series().clone())
        .map_err(|_| InsightError::ColumnNotFound(name.to_string()))
}
