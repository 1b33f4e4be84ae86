//! Lightweight text export, one markdown section per article.
use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

#[derive(Default)]
pub struct MarkdownTransformer;

impl Transform for MarkdownTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        let sections: Vec<String> = corpus
            .iter()
            .map(|p| {
                let date = p
                    .date
                    .as_ref()
                    .map(|d| format!("{:04}-{:02}-{:02}", d.year, d.month, d.day))
                    .unwrap_or_else(|| "undated".to_string());
                format!(
                    "# {}\n\n**{}**, {}, {}\n\n{}\n",
                    p.title, p.journal_clean, date, p.author, p.text
                )
            })
            .collect();
        Ok(sections.join("\n---\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::test_utils::corpus;

    #[test]
    fn sections() {
        let out = MarkdownTransformer.transform(&corpus()).unwrap();
        assert!(out.starts_with("# Premier\n\n**Le Monde**, 2022-01-03, Unknown"));
        assert_eq!(out.matches("\n---\n").count(), 2);
        assert!(out.contains("**Le Monde**, undated"));
    }

    #[test]
    fn empty_corpus() {
        assert_eq!(MarkdownTransformer.transform(&[]).unwrap(), "");
    }
}
