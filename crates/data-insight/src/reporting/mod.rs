//! Report writing.
//!
//! The report is the [`Report`](crate::types::Report) document: the stats
//! record plus the insights, pretty-printed as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_insight::{ArtifactSink, reporting::ReportWriter};
//!
//! let writer = ReportWriter::new(ArtifactSink::default());
//! let path = writer.write(&stats, &insights)?;
//! ```

mod writer;

pub use writer::{ReportWriter, read_report};
