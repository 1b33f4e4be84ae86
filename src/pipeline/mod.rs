//! Pipelines.
//!
//! [EuropressePipeline] turns raw documents into a merged [crate::processing::Corpus]
//! and fans it out to the requested outputs.
mod europresse;
mod pool;
mod report;

pub use europresse::EuropressePipeline;
pub use pool::run_unit;
pub use report::{DocumentFailure, ExportFailure, ExportResult, PipelineReport};
