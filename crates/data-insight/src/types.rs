use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Shape and missing-value summary of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Rows left after fully-empty rows were dropped.
    #[serde(rename = "rows")]
    pub row_count: usize,
    /// Column names in file order.
    #[serde(rename = "columns")]
    pub column_names: Vec<String>,
    /// Null count per column, in file order.
    #[serde(rename = "missing_values")]
    pub missing_per_column: IndexMap<String, usize>,
}

/// Partition of column names, each list in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
    pub date_like: Vec<String>,
}

impl ColumnClassification {
    /// Insight count implied by this classification.
    pub fn expected_insight_count(&self) -> usize {
        self.numeric.len()
            + usize::from(!self.categorical.is_empty())
            + usize::from(!self.date_like.is_empty())
    }
}

/// A templated question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub question: String,
    pub answer: String,
}

impl Insight {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// The document written to `report.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub stats: StatsRecord,
    pub insights: Vec<Insight>,
}

/// Everything a single run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultBundle {
    pub stats: StatsRecord,
    /// Histograms in column order, then the heatmap if any.
    pub plots: Vec<PathBuf>,
    pub insights: Vec<Insight>,
    pub report_json: PathBuf,
}
