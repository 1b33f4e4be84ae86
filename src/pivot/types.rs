use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sentinel author when none could be found.
pub const UNKNOWN_AUTHOR: &str = "Unknown";
/// Sentinel language when detection returned nothing.
pub const UNKNOWN_LANGUAGE: &str = "UNK";

/// maximum length (in chars) of the article snippet kept in an [ExtractionError].
const SNIPPET_LEN: usize = 200;

/// One input file: its name and raw markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub name: String,
    pub content: String,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Decomposed publication date.
///
/// `date` is rendered as `%Y %m %dT%H:%M:%S`, `epoch` considers the date as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PivotDate {
    pub date: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub epoch: i64,
}

impl From<NaiveDateTime> for PivotDate {
    fn from(dt: NaiveDateTime) -> Self {
        Self {
            date: dt.format("%Y %m %dT%H:%M:%S").to_string(),
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            epoch: dt.and_utc().timestamp(),
        }
    }
}

/// Canonical article record.
///
/// Every export format is built from these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pivot {
    pub journal: String,
    pub journal_clean: String,
    /// [None] when no date could be resolved.
    /// Flattened so that the date fields sit next to the others once serialized.
    #[serde(flatten)]
    pub date: Option<PivotDate>,
    pub title: String,
    pub complement: String,
    pub text: String,
    pub author: String,
    pub keywords: String,
    pub language: String,
}

impl Pivot {
    /// date string, empty when there is no date.
    pub fn date_str(&self) -> &str {
        self.date.as_ref().map(|d| d.date.as_str()).unwrap_or("")
    }

    pub fn epoch(&self) -> Option<i64> {
        self.date.as_ref().map(|d| d.epoch)
    }

    /// `(title, journal_clean, date)` triple used to spot duplicate articles.
    pub fn identity_key(&self) -> String {
        [self.title.as_str(), self.journal_clean.as_str(), self.date_str()].join(" ")
    }
}

/// Article that could not be turned into a [Pivot].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionError {
    /// missing field, `journal` or `title`.
    pub tag: String,
    pub message: String,
    /// beginning of the article markup.
    pub article: String,
    /// name of the document the article comes from.
    pub source: String,
}

impl ExtractionError {
    pub fn new(tag: &str, message: impl Into<String>, article_html: &str, source: &str) -> Self {
        Self {
            tag: tag.to_string(),
            message: message.into(),
            article: article_html.chars().take(SNIPPET_LEN).collect(),
            source: source.to_string(),
        }
    }
}

/// Result of the extraction of a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<Pivot>,
    pub errors: Vec<ExtractionError>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn pivot(date: Option<PivotDate>) -> Pivot {
        Pivot {
            journal: "Le Monde (site web)".to_string(),
            journal_clean: "Le Monde".to_string(),
            date,
            title: "Titre".to_string(),
            complement: String::new(),
            text: "Texte".to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            keywords: String::new(),
            language: UNKNOWN_LANGUAGE.to_string(),
        }
    }

    #[test]
    fn date_decomposition() {
        let dt = NaiveDate::from_ymd_opt(2022, 1, 3)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        let d = PivotDate::from(dt);
        assert_eq!(d.date, "2022 01 03T14:30:05");
        assert_eq!((d.year, d.month, d.day), (2022, 1, 3));
        assert_eq!((d.hour, d.minute, d.second), (14, 30, 5));
        assert_eq!(d.epoch, 1641220205);
    }

    #[test]
    fn identity_key_without_date() {
        let p = pivot(None);
        assert_eq!(p.identity_key(), "Titre Le Monde ");
        assert_eq!(p.epoch(), None);
    }

    #[test]
    fn serialization_flattens_date() {
        let dt = NaiveDate::from_ymd_opt(2022, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let p = pivot(Some(dt.into()));
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["year"], 2022);
        assert_eq!(v["date"], "2022 01 03T00:00:00");

        let back: Pivot = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);

        let undated = serde_json::to_value(pivot(None)).unwrap();
        assert!(undated.get("epoch").is_none());
    }

    #[test]
    fn snippet_is_truncated() {
        let html = "x".repeat(1000);
        let e = ExtractionError::new("title", "no title", &html, "doc.html");
        assert_eq!(e.article.chars().count(), SNIPPET_LEN);
    }
}
