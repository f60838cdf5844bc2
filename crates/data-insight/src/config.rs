//! Configuration for an insight run.
//!
//! [`AgentConfig`] decides where artifacts land and how charts are sized.
//! Use [`AgentConfig::builder()`] for a validated configuration, or
//! deserialize one from JSON (the CLI's `--config` flag).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Missing-value markers recognised when reading CSV, on top of empty fields.
pub const DEFAULT_NULL_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Configuration for [`DataInsightAgent`](crate::DataInsightAgent).
///
/// # Example
///
/// ```rust,ignore
/// use data_insight::AgentConfig;
///
/// let config = AgentConfig::builder()
///     .output_dir("artifacts")
///     .max_histograms(2)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Directory receiving charts and the JSON report. Created if absent,
    /// files in it are overwritten on every run.
    /// Default: "outputs"
    pub output_dir: PathBuf,

    /// File name of the JSON report inside `output_dir`.
    /// Default: "report.json"
    pub report_file_name: String,

    /// File name of the correlation heatmap inside `output_dir`.
    /// Default: "correlation_heatmap.png"
    pub heatmap_file_name: String,

    /// Maximum number of histograms, taken from the first numeric columns.
    /// Default: 3
    pub max_histograms: usize,

    /// Chart width in pixels.
    /// Default: 600
    pub chart_width: u32,

    /// Chart height in pixels.
    /// Default: 400
    pub chart_height: u32,

    /// Columns whose name contains this keyword (case-insensitive) are date-like.
    /// Default: "date"
    pub date_keyword: String,

    /// Cell values read as missing.
    pub null_markers: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("outputs"),
            report_file_name: "report.json".to_string(),
            heatmap_file_name: "correlation_heatmap.png".to_string(),
            max_histograms: 3,
            chart_width: 600,
            chart_height: 400,
            date_keyword: "date".to_string(),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl AgentConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("report_file_name", &self.report_file_name),
            ("heatmap_file_name", &self.heatmap_file_name),
        ] {
            if value.trim().is_empty() || value.contains(['/', '\\']) {
                return Err(ConfigValidationError::InvalidFileName {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(ConfigValidationError::InvalidChartSize {
                width: self.chart_width,
                height: self.chart_height,
            });
        }

        if self.date_keyword.trim().is_empty() {
            return Err(ConfigValidationError::EmptyDateKeyword);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid file name for '{field}': '{value}' (must be a plain, non-empty file name)")]
    InvalidFileName { field: String, value: String },

    #[error("Invalid chart size: {width}x{height} (both dimensions must be at least 1)")]
    InvalidChartSize { width: u32, height: u32 },

    #[error("Date keyword must not be empty")]
    EmptyDateKeyword,
}

impl From<ConfigValidationError> for crate::error::InsightError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InsightError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AgentConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AgentConfigBuilder {
    output_dir: Option<PathBuf>,
    report_file_name: Option<String>,
    heatmap_file_name: Option<String>,
    max_histograms: Option<usize>,
    chart_width: Option<u32>,
    chart_height: Option<u32>,
    date_keyword: Option<String>,
    null_markers: Option<Vec<String>>,
}

impl AgentConfigBuilder {
    /// Set the artifact directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the report file name (no directories).
    pub fn report_file_name(mut self, name: impl Into<String>) -> Self {
        self.report_file_name = Some(name.into());
        self
    }

    /// Set the heatmap file name (no directories).
    pub fn heatmap_file_name(mut self, name: impl Into<String>) -> Self {
        self.heatmap_file_name = Some(name.into());
        self
    }

    /// Set how many numeric columns get a histogram. Zero disables histograms.
    pub fn max_histograms(mut self, count: usize) -> Self {
        self.max_histograms = Some(count);
        self
    }

    /// Set the chart size in pixels.
    pub fn chart_size(mut self, width: u32, height: u32) -> Self {
        self.chart_width = Some(width);
        self.chart_height = Some(height);
        self
    }

    /// Set the keyword that marks a column as date-like.
    pub fn date_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.date_keyword = Some(keyword.into());
        self
    }

    /// Replace the missing-value markers.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AgentConfig` or an error if validation fails.
    pub fn build(self) -> Result<AgentConfig, ConfigValidationError> {
        let defaults = AgentConfig::default();
        let config = AgentConfig {
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            report_file_name: self.report_file_name.unwrap_or(defaults.report_file_name),
            heatmap_file_name: self.heatmap_file_name.unwrap_or(defaults.heatmap_file_name),
            max_histograms: self.max_histograms.unwrap_or(defaults.max_histograms),
            chart_width: self.chart_width.unwrap_or(defaults.chart_width),
            chart_height: self.chart_height.unwrap_or(defaults.chart_height),
            date_keyword: self.date_keyword.unwrap_or(defaults.date_keyword),
            null_markers: self.null_markers.unwrap_or(defaults.null_markers),
        };

        config.validate()?;
        Ok(config)
    }
}
