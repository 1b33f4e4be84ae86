//! Article extraction.
use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use scraper::{ElementRef, Html};
use tokio_util::sync::CancellationToken;

use super::rules::{Requirement, Rules};
use super::types::{
    Extraction, ExtractionError, Pivot, PivotDate, RawDocument, UNKNOWN_AUTHOR, UNKNOWN_LANGUAGE,
};
use crate::date::find_datetime;
use crate::error::Error;
use crate::identifiers::{LanguageDetector, StopwordDetector};
use crate::keywords::{KeywordExtractor, TitleOverlap};

lazy_static! {
    /// masthead decorations: `(site web)`, ` - Paris`, `, no. 123`, edition numbers, `.fr`...
    static ref JOURNAL_SEPARATORS: Regex = Regex::new(r"\(| -|,? no. | \d|  | ;|\.fr").unwrap();
}

/// separator of the complement fields.
const COMPLEMENT_SEPARATOR: &str = " | ";

/// Strip the masthead decorations, keeping the newspaper name.
pub fn clean_journal(journal: &str) -> String {
    JOURNAL_SEPARATORS
        .split(journal)
        .next()
        .unwrap_or(journal)
        .trim()
        .to_string()
}

/// Outcome of a single `<article>`.
enum ArticleOutcome {
    Record(Pivot),
    /// not a press article (no body text).
    Skipped,
    Rejected { tag: &'static str, message: String },
}

/// Extracts [Pivot]s from raw documents.
///
/// The extractor holds no per-document state, and a single instance
/// can be shared between workers.
pub struct PivotExtractor {
    rules: Rules,
    language: Arc<dyn LanguageDetector + Send + Sync>,
    keywords: Arc<dyn KeywordExtractor + Send + Sync>,
}

impl PivotExtractor {
    /// Extractor with the Europresse rules and the default collaborators.
    pub fn new() -> Result<Self, Error> {
        Ok(Self::with_collaborators(
            Rules::europresse()?,
            Arc::new(StopwordDetector::default()),
            Arc::new(TitleOverlap::default()),
        ))
    }

    /// Extractor with the Europresse rules and another language detector.
    pub fn with_language(language: Arc<dyn LanguageDetector + Send + Sync>) -> Result<Self, Error> {
        Ok(Self::with_collaborators(
            Rules::europresse()?,
            language,
            Arc::new(TitleOverlap::default()),
        ))
    }

    pub fn with_collaborators(
        rules: Rules,
        language: Arc<dyn LanguageDetector + Send + Sync>,
        keywords: Arc<dyn KeywordExtractor + Send + Sync>,
    ) -> Self {
        Self {
            rules,
            language,
            keywords,
        }
    }

    /// Extract every article of a document.
    ///
    /// Malformed articles end up in [Extraction::errors], this never fails.
    pub fn extract(&self, doc: &RawDocument) -> Extraction {
        match self.extract_cancellable(doc, &CancellationToken::new()) {
            Ok(extraction) => extraction,
            // a fresh token is never cancelled
            Err(_) => Extraction::default(),
        }
    }

    /// Extract every article of a document,
    /// checking the token before each article.
    ///
    /// Returns [Error::Cancelled] when the token has been cancelled.
    pub fn extract_cancellable(
        &self,
        doc: &RawDocument,
        token: &CancellationToken,
    ) -> Result<Extraction, Error> {
        debug!("Processing file {}", doc.name);
        let html = Html::parse_document(&doc.content);

        let mut extraction = Extraction::default();
        let mut ids = HashSet::new();
        let mut nb_articles = 0;
        let mut nb_skipped = 0;

        for article in html.select(&self.rules.article) {
            if token.is_cancelled() {
                info!("[{}] cancelled after {} articles", doc.name, nb_articles);
                return Err(Error::Cancelled);
            }
            nb_articles += 1;

            match self.extract_article(article) {
                ArticleOutcome::Record(pivot) => {
                    if ids.insert(pivot.identity_key()) {
                        extraction.records.push(pivot);
                    } else {
                        debug!("[{}] duplicate article {:?}", doc.name, pivot.title);
                    }
                }
                ArticleOutcome::Skipped => {
                    nb_skipped += 1;
                    debug!("[{}] article without text, skipping", doc.name);
                }
                ArticleOutcome::Rejected { tag, message } => {
                    debug!("[{}] bad article ({}): {}", doc.name, tag, message);
                    extraction.errors.push(ExtractionError::new(
                        tag,
                        message,
                        &article.html(),
                        &doc.name,
                    ));
                }
            }
        }

        info!(
            "[{}] {} articles: {} records, {} errors, {} skipped",
            doc.name,
            nb_articles,
            extraction.records.len(),
            extraction.errors.len(),
            nb_skipped
        );
        Ok(extraction)
    }

    /// Go through the field rules for a single article.
    fn extract_article(&self, article: ElementRef) -> ArticleOutcome {
        let rules = &self.rules;

        let journal = match rules.journal.find_text(article) {
            Some(journal) => journal,
            None => return rejected(rules.journal.requirement, "not a press article"),
        };

        let header = rules.header.find_text(article).unwrap_or_default();
        let sub_section = rules.sub_section.find_text(article).unwrap_or_default();

        let date = find_datetime(&header)
            .or_else(|| find_datetime(&sub_section))
            .map(PivotDate::from);

        let container = match rules.title_container.find_element(article) {
            Some(container) => container,
            None => return rejected(rules.title_container.requirement, "no title container"),
        };

        let title = match rules.title.find_text(container) {
            Some(title) => title,
            None => return rejected(rules.title.requirement, "empty title"),
        };

        let bottom_news = rules.bottom_news.find_text(container).unwrap_or_default();
        let subtitle = rules.subtitle.find_text(container).unwrap_or_default();
        let complement = [
            header.as_str(),
            sub_section.as_str(),
            bottom_news.as_str(),
            subtitle.as_str(),
        ]
        .join(COMPLEMENT_SEPARATOR);

        let text = match rules.text.find_text(article) {
            Some(text) => text,
            None => return rejected(rules.text.requirement, "no text"),
        };

        let author = rules
            .author
            .find(container)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        let journal_clean = clean_journal(&journal);

        let keywords = self
            .keywords
            .extract(&title, &text)
            .into_iter()
            .map(|k| k.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ");

        let language = self
            .language
            .detect(&text)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

        ArticleOutcome::Record(Pivot {
            journal,
            journal_clean,
            date,
            title,
            complement,
            text,
            author,
            keywords,
            language,
        })
    }
}

/// outcome of a rule that matched nothing.
fn rejected(requirement: Requirement, message: &str) -> ArticleOutcome {
    match requirement {
        Requirement::Required(tag) => ArticleOutcome::Rejected {
            tag,
            message: message.to_string(),
        },
        Requirement::SkipArticle => ArticleOutcome::Skipped,
        // optional rules are never rejected
        Requirement::Optional => ArticleOutcome::Skipped,
    }
}
