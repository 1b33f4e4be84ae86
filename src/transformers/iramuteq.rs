//! Iramuteq export.
//!
//! Every article starts with a star line holding its variables:
//! `**** *Journal_Le_Monde *Year_2022 ...`, followed by its text.
use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

#[derive(Default)]
pub struct IramuteqTransformer;

impl IramuteqTransformer {
    /// `journal_clean` -> `JournalClean`
    fn to_camel(key: &str) -> String {
        key.split('_')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect()
    }

    /// Iramuteq variables cannot hold spaces or punctuation.
    fn format_value(value: &str) -> String {
        let cleaned: String = value
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        cleaned
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// text, complement, date and epoch are not exported as variables.
    fn variables(pivot: &Pivot) -> Vec<(&'static str, String)> {
        let mut variables = vec![
            ("journal", pivot.journal.clone()),
            ("journal_clean", pivot.journal_clean.clone()),
        ];
        if let Some(date) = &pivot.date {
            variables.extend([
                ("year", date.year.to_string()),
                ("month", date.month.to_string()),
                ("day", date.day.to_string()),
                ("hour", date.hour.to_string()),
                ("minute", date.minute.to_string()),
                ("second", date.second.to_string()),
            ]);
        }
        variables.extend([
            ("title", pivot.title.clone()),
            ("author", pivot.author.clone()),
            ("keywords", pivot.keywords.clone()),
            ("language", pivot.language.clone()),
        ]);
        variables
    }
}

impl Transform for IramuteqTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        let mut out = String::new();
        for pivot in corpus {
            let stars: Vec<String> = Self::variables(pivot)
                .into_iter()
                .map(|(k, v)| format!("*{}_{}", Self::to_camel(k), Self::format_value(&v)))
                .collect();
            out.push_str("**** ");
            out.push_str(&stars.join(" "));
            out.push('\n');
            out.push_str(&pivot.text);
            out.push_str("\n\n");
        }
        Ok(out)
    }
}
