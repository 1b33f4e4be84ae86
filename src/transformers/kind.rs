//! Output kinds and formats.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Requestable outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// the pivot records themselves
    Json,
    /// TXM xml
    Txm,
    /// Iramuteq starred text
    Iramuteq,
    /// Gephi edge list
    Gephi,
    Csv,
    Stats,
    ProcessedStats,
    Plots,
    Markdown,
}

impl OutputKind {
    pub const ALL: [OutputKind; 9] = [
        OutputKind::Json,
        OutputKind::Txm,
        OutputKind::Iramuteq,
        OutputKind::Gephi,
        OutputKind::Csv,
        OutputKind::Stats,
        OutputKind::ProcessedStats,
        OutputKind::Plots,
        OutputKind::Markdown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputKind::Json => "json",
            OutputKind::Txm => "txm",
            OutputKind::Iramuteq => "iramuteq",
            OutputKind::Gephi => "gephi",
            OutputKind::Csv => "csv",
            OutputKind::Stats => "stats",
            OutputKind::ProcessedStats => "processed_stats",
            OutputKind::Plots => "plots",
            OutputKind::Markdown => "markdown",
        }
    }

    /// whether this output is built from the corpus statistics.
    pub fn is_stats(&self) -> bool {
        matches!(
            self,
            OutputKind::Stats | OutputKind::ProcessedStats | OutputKind::Plots
        )
    }

    /// file extension of the produced file.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Json | OutputKind::Stats | OutputKind::ProcessedStats => "json",
            OutputKind::Txm => "xml",
            OutputKind::Iramuteq => "txt",
            OutputKind::Gephi | OutputKind::Csv => "csv",
            OutputKind::Plots => "svg",
            OutputKind::Markdown => "md",
        }
    }

    /// `<kind>_output.<ext>`
    pub fn filename(&self) -> String {
        format!("{}_output.{}", self.name(), self.extension())
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace('-', "_");
        OutputKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = OutputKind::ALL.iter().map(|k| k.name()).collect();
                Error::Custom(format!(
                    "unknown output {s:?}, expected one of {}",
                    names.join(", ")
                ))
            })
    }
}

/// Format families, used to pick a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// table
    Csv,
    /// structured
    Json,
    /// plain text
    Txt,
    /// markup
    Xml,
}

/// A produced output, ready to be written or sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerOutput {
    pub kind: OutputKind,
    pub format: OutputFormat,
    pub data: String,
    pub filename: String,
}

impl TransformerOutput {
    pub fn new(kind: OutputKind, format: OutputFormat, data: String) -> Self {
        Self {
            kind,
            format,
            data,
            filename: kind.filename(),
        }
    }
}
