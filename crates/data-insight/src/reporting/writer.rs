use crate::artifacts::ArtifactSink;
use crate::error::{Result, ResultExt};
use crate::types::{Insight, Report, StatsRecord};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `report.json` into an [`ArtifactSink`].
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    sink: ArtifactSink,
}

impl ReportWriter {
    pub fn new(sink: ArtifactSink) -> Self {
        Self { sink }
    }

    /// Serialize `{stats, insights}` and return the path written.
    ///
    /// An existing report at the same path is replaced.
    pub fn write(&self, stats: &StatsRecord, insights: &[Insight]) -> Result<PathBuf> {
        self.sink.ensure_dir()?;

        let report = Report {
            stats: stats.clone(),
            insights: insights.to_vec(),
        };

        let report_path = self.sink.report_path();
        let mut file = File::create(&report_path)
            .context(format!("Failed to create report '{}'", report_path.display()))?;
        file.write_all(serde_json::to_string_pretty(&report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

/// Read a report written by [`ReportWriter::write`].
pub fn read_report(path: &Path) -> Result<Report> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read report '{}'", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}
