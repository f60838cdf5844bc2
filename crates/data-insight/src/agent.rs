//! The end-to-end run: load, profile, chart, synthesize, report.

use crate::artifacts::ArtifactSink;
use crate::charts::ChartGenerator;
use crate::config::AgentConfig;
use crate::error::Result;
use crate::highlights::DatasetHighlights;
use crate::insights::InsightSynthesizer;
use crate::loader::load_dataset;
use crate::profiler::{DatasetProfile, DatasetProfiler};
use crate::reporting::ReportWriter;
use crate::types::ResultBundle;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Runs the full analysis of one CSV file.
///
/// # Example
///
/// ```rust,ignore
/// use data_insight::{AgentConfig, DataInsightAgent};
///
/// let agent = DataInsightAgent::new(AgentConfig::default());
/// let bundle = agent.run("data/sales.csv")?;
/// println!("{}", bundle.report_json.display());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataInsightAgent {
    config: AgentConfig,
}

impl DataInsightAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Analyze `path` and write charts plus `report.json` to the output
    /// directory.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<ResultBundle> {
        let (bundle, _) = self.execute(path.as_ref())?;
        Ok(bundle)
    }

    /// Like [`run`](Self::run), also returning the headline figures a front
    /// end shows next to the report.
    pub fn run_with_highlights(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(ResultBundle, DatasetHighlights)> {
        let (bundle, profile) = self.execute(path.as_ref())?;
        let highlights = DatasetHighlights::compute(&profile)?;
        Ok((bundle, highlights))
    }

    fn execute(&self, path: &Path) -> Result<(ResultBundle, DatasetProfile)> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Starting insight run for {}", path.display());

        info!("Step 1: Loading dataset...");
        let df = load_dataset(path, &self.config.null_markers)?;

        info!("Step 2: Profiling dataset...");
        let profile = DatasetProfiler::new(&self.config.date_keyword).profile(df)?;

        info!("Step 3: Generating charts...");
        let plots = ChartGenerator::from_config(&self.config)
            .generate(&profile.data, &profile.classification.numeric)?;

        info!("Step 4: Synthesizing insights...");
        let insights = InsightSynthesizer::new().synthesize(&profile)?;

        info!("Step 5: Writing report...");
        let report_json = ReportWriter::new(ArtifactSink::from_config(&self.config))
            .write(&profile.stats, &insights)?;

        info!(
            "Insight run completed in {} ms: {} plots, {} insights",
            start_time.elapsed().as_millis(),
            plots.len(),
            insights.len()
        );

        let bundle = ResultBundle {
            stats: profile.stats.clone(),
            plots,
            insights,
            report_json,
        };
        Ok((bundle, profile))
    }
}
