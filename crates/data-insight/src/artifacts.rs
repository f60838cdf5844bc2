//! Where run artifacts are written and what they are called.
//!
//! File names are deterministic: rerunning in the same directory overwrites
//! the previous charts and report.

use crate::config::AgentConfig;
use crate::error::{Result, ResultExt};
use crate::utils::sanitize_file_component;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Output directory plus naming rules for charts and the report.
#[derive(Debug, Clone)]
pub struct ArtifactSink {
    dir: PathBuf,
    report_file_name: String,
    heatmap_file_name: String,
}

impl ArtifactSink {
    pub fn new(
        dir: impl Into<PathBuf>,
        report_file_name: impl Into<String>,
        heatmap_file_name: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            report_file_name: report_file_name.into(),
            heatmap_file_name: heatmap_file_name.into(),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            &config.output_dir,
            &config.report_file_name,
            &config.heatmap_file_name,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the output directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            debug!("Creating artifact directory {}", self.dir.display());
        }
        fs::create_dir_all(&self.dir).context(format!(
            "Failed to create artifact directory '{}'",
            self.dir.display()
        ))
    }

    /// `hist_{column}.png`, with the column name made file-system safe.
    pub fn histogram_path(&self, column: &str) -> PathBuf {
        self.dir
            .join(format!("hist_{}.png", sanitize_file_component(column)))
    }

    pub fn heatmap_path(&self) -> PathBuf {
        self.dir.join(&self.heatmap_file_name)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(&self.report_file_name)
    }
}

impl Default for ArtifactSink {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default())
    }
}
