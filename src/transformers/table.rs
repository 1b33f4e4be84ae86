//! Generic table export.
use serde::Serialize;

use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

/// flat csv row. Undated records get empty date cells.
#[derive(Serialize)]
struct Row<'a> {
    journal: &'a str,
    journal_clean: &'a str,
    date: Option<&'a str>,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    epoch: Option<i64>,
    title: &'a str,
    complement: &'a str,
    text: &'a str,
    author: &'a str,
    keywords: &'a str,
    language: &'a str,
}

impl<'a> From<&'a Pivot> for Row<'a> {
    fn from(p: &'a Pivot) -> Self {
        let d = p.date.as_ref();
        Self {
            journal: &p.journal,
            journal_clean: &p.journal_clean,
            date: d.map(|d| d.date.as_str()),
            year: d.map(|d| d.year),
            month: d.map(|d| d.month),
            day: d.map(|d| d.day),
            hour: d.map(|d| d.hour),
            minute: d.map(|d| d.minute),
            second: d.map(|d| d.second),
            epoch: d.map(|d| d.epoch),
            title: &p.title,
            complement: &p.complement,
            text: &p.text,
            author: &p.author,
            keywords: &p.keywords,
            language: &p.language,
        }
    }
}

#[derive(Default)]
pub struct CsvTransformer;

impl Transform for CsvTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for pivot in corpus {
            writer.serialize(Row::from(pivot))?;
        }
        Ok(String::from_utf8(writer.into_inner()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::test_utils::corpus;

    #[test]
    fn rows() {
        let out = CsvTransformer.transform(&corpus()).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("journal"));
        assert_eq!(headers.len(), 16);

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get(3), Some("2022"));
        // undated
        assert_eq!(records[2].get(3), Some(""));
        assert_eq!(records[2].get(10), Some("Troisième"));
    }
}
