//! Pipeline outcomes.
use std::fmt;

use crate::pivot::ExtractionError;
use crate::processing::Corpus;
use crate::transformers::{OutputKind, TransformerOutput};

/// A document whose extraction failed as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub name: String,
    pub message: String,
}

impl fmt::Display for DocumentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document\t{}\t{}", self.name, self.message)
    }
}

/// A requested output whose producer failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub kind: OutputKind,
    pub message: String,
}

impl fmt::Display for ExportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "export\t{}\t{}", self.kind, self.message)
    }
}

pub type ExportResult = Result<TransformerOutput, ExportFailure>;

/// Everything a run produced, successes and diagnostics alike.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub corpus: Corpus,
    pub extraction_errors: Vec<ExtractionError>,
    pub document_failures: Vec<DocumentFailure>,
    /// one entry per requested kind, in no particular order.
    pub results: Vec<ExportResult>,
}

impl PipelineReport {
    pub fn outputs(&self) -> impl Iterator<Item = &TransformerOutput> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn export_failures(&self) -> impl Iterator<Item = &ExportFailure> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    /// One line per diagnostic, tab separated.
    pub fn diagnostics(&self) -> Vec<String> {
        let extraction = self.extraction_errors.iter().map(|e| {
            format!(
                "article\t{}\t{}: {}\t{}",
                e.source,
                e.tag,
                e.message,
                e.article.replace(['\n', '\t'], " ")
            )
        });
        let documents = self.document_failures.iter().map(|f| f.to_string());
        let exports = self.export_failures().map(|f| f.to_string());
        extraction.chain(documents).chain(exports).collect()
    }
}
