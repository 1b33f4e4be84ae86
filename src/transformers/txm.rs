//! TXM export: one `<text>` element per article, metadata as attributes.
use std::fmt::Write;

use quick_xml::escape::escape;

use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

#[derive(Default)]
pub struct TxmTransformer;

impl TxmTransformer {
    fn attributes(pivot: &Pivot) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("journal", pivot.journal_clean.clone()),
            ("title", pivot.title.clone()),
            ("author", pivot.author.clone()),
            ("keywords", pivot.keywords.clone()),
            ("language", pivot.language.clone()),
        ];
        if let Some(date) = &pivot.date {
            attributes.extend([
                ("date", date.date.clone()),
                ("year", date.year.to_string()),
                ("month", date.month.to_string()),
                ("day", date.day.to_string()),
            ]);
        }
        attributes
    }
}

impl Transform for TxmTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xml
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<corpus>\n");
        for pivot in corpus {
            out.push_str("<text");
            for (name, value) in Self::attributes(pivot) {
                write!(out, " {}=\"{}\"", name, escape(value.as_str()))?;
            }
            out.push_str(">\n");
            out.push_str(&escape(pivot.text.as_str()));
            out.push_str("\n</text>\n");
        }
        out.push_str("</corpus>\n");
        Ok(out)
    }
}
