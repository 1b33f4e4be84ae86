//! Graph export: journal -> keyword edges, weighted by co-occurrence, as a Gephi edge table.
use std::collections::BTreeMap;

use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

#[derive(Default)]
pub struct GephiTransformer;

impl GephiTransformer {
    fn edges(corpus: &[Pivot]) -> BTreeMap<(&str, &str), usize> {
        let mut edges = BTreeMap::new();
        for pivot in corpus {
            let keywords = pivot
                .keywords
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty());
            for keyword in keywords {
                *edges
                    .entry((pivot.journal_clean.as_str(), keyword))
                    .or_insert(0) += 1;
            }
        }
        edges
    }
}

impl Transform for GephiTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["Source", "Target", "Weight", "Type"])?;
        for ((source, target), weight) in Self::edges(corpus) {
            writer.write_record([source, target, &weight.to_string(), "Directed"])?;
        }
        Ok(String::from_utf8(writer.into_inner()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::test_utils::corpus;

    #[test]
    fn weighted_edges() {
        let out = GephiTransformer.transform(&corpus()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Source,Target,Weight,Type");
        assert!(lines.contains(&"Le Monde,réforme,2,Directed"));
        assert!(lines.contains(&"Libération,retraites,1,Directed"));
        assert_eq!(lines.len(), 5);
    }
}
