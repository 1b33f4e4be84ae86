/*! Corpus transformers.

Each [OutputKind] is produced by a transformer that serializes the corpus
([Transform]) or the corpus statistics ([StatsTransform]).

Statistics are expensive compared to straight serialization,
they are computed once ([Stats::compute]) and shared by every statistics-based output.
!*/
mod gephi;
mod iramuteq;
mod json;
mod kind;
mod markdown;
mod producers;
mod stats;
mod table;
mod txm;

pub use gephi::GephiTransformer;
pub use iramuteq::IramuteqTransformer;
pub use json::JsonTransformer;
pub use kind::{OutputFormat, OutputKind, TransformerOutput};
pub use markdown::MarkdownTransformer;
pub use producers::{Producer, Producers};
pub use stats::{PlotsTransformer, ProcessedStatsTransformer, Stats, StatsJsonTransformer};
pub use table::CsvTransformer;
pub use txm::TxmTransformer;

use crate::error::Error;
use crate::pivot::Pivot;

/// Serializes a corpus into a single output.
pub trait Transform {
    fn format(&self) -> OutputFormat;
    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error>;
}

/// Serializes precomputed statistics into a single output.
pub trait StatsTransform {
    fn format(&self) -> OutputFormat;
    fn transform(&self, stats: &Stats) -> Result<String, Error>;
}

#[cfg(test)]
pub(crate) mod test_utils {
    use chrono::NaiveDate;

    use crate::pivot::{Pivot, PivotDate};

    pub fn pivot(title: &str, journal: &str, ymd: Option<(i32, u32, u32)>) -> Pivot {
        Pivot {
            journal: format!("{journal} (site web)"),
            journal_clean: journal.to_string(),
            date: ymd.map(|(y, m, d)| {
                PivotDate::from(
                    NaiveDate::from_ymd_opt(y, m, d)
                        .unwrap()
                        .and_hms_opt(8, 0, 0)
                        .unwrap(),
                )
            }),
            title: title.to_string(),
            complement: "header |  |  | ".to_string(),
            text: format!("Texte de l'article {title}."),
            author: "Unknown".to_string(),
            keywords: "réforme, retraites".to_string(),
            language: "fr".to_string(),
        }
    }

    pub fn corpus() -> Vec<Pivot> {
        vec![
            pivot("Premier", "Le Monde", Some((2022, 1, 3))),
            pivot("Second", "Libération", Some((2022, 2, 10))),
            pivot("Troisième", "Le Monde", None),
        ]
    }
}
