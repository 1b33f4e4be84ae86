//! Stop word based language detection.
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::LanguageDetector;

lazy_static! {
    /// very frequent function words, per language tag.
    static ref STOPWORDS: Vec<(&'static str, HashSet<&'static str>)> = vec![
        (
            "fr",
            [
                "le", "la", "les", "des", "une", "est", "et", "du", "au", "aux", "dans", "pour",
                "par", "sur", "avec", "qui", "que", "pas", "cette", "mais", "ont", "sont", "été",
                "nous", "vous", "ils", "elle", "leur", "entre", "après",
            ]
            .into_iter()
            .collect(),
        ),
        (
            "en",
            [
                "the", "and", "of", "to", "is", "was", "for", "that", "with", "this", "are", "have",
                "has", "from", "they", "will", "which", "their", "been", "were", "would", "there",
                "about", "after", "into",
            ]
            .into_iter()
            .collect(),
        ),
        (
            "de",
            [
                "der", "die", "das", "und", "ist", "nicht", "mit", "von", "den", "ein", "eine",
                "auf", "sich", "auch", "dem", "wird", "für", "werden", "sind", "wurde", "oder",
            ]
            .into_iter()
            .collect(),
        ),
        (
            "es",
            [
                "el", "los", "las", "del", "y", "una", "por", "con", "para", "es", "lo", "como",
                "pero", "sus", "fue", "este", "esta", "entre", "cuando", "muy", "sin", "sobre",
            ]
            .into_iter()
            .collect(),
        ),
        (
            "it",
            [
                "il", "di", "che", "gli", "della", "delle", "per", "con", "non", "una", "sono",
                "nel", "alla", "anche", "come", "questo", "più", "dei", "stato", "essere",
            ]
            .into_iter()
            .collect(),
        ),
        (
            "pt",
            [
                "os", "do", "da", "dos", "das", "não", "uma", "com", "para", "por", "mais", "foi",
                "como", "mas", "ao", "ele", "são", "também", "pelo", "pela",
            ]
            .into_iter()
            .collect(),
        ),
    ];
}

/// Counts stop word occurrences for each known language and keeps the best one.
///
/// Texts that are too short, or that do not contain enough stop words,
/// are not identified.
pub struct StopwordDetector {
    min_chars: usize,
    min_hits: usize,
}

impl StopwordDetector {
    pub fn new(min_chars: usize, min_hits: usize) -> Self {
        Self {
            min_chars,
            min_hits,
        }
    }

    fn scores(text: &str) -> HashMap<&'static str, usize> {
        let mut scores = HashMap::new();
        for word in text.unicode_words() {
            let word = word.to_lowercase();
            for (lang, stopwords) in STOPWORDS.iter() {
                if stopwords.contains(word.as_str()) {
                    *scores.entry(*lang).or_insert(0) += 1;
                }
            }
        }
        scores
    }
}

impl Default for StopwordDetector {
    /// 20 characters, 2 stop words.
    fn default() -> Self {
        Self::new(20, 2)
    }
}

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Option<String> {
        if text.trim().chars().count() < self.min_chars {
            return None;
        }

        let scores = Self::scores(text);
        debug!("stop word scores: {:?}", scores);

        // ties are broken by table order, so that results are deterministic.
        let best = STOPWORDS
            .iter()
            .filter_map(|(lang, _)| scores.get(lang).map(|s| (*lang, *s)))
            .fold(None, |best: Option<(&str, usize)>, (lang, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((lang, score)),
            });

        match best {
            Some((lang, score)) if score >= self.min_hits => Some(lang.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french() {
        let text = "Le gouvernement a présenté mardi les grandes lignes de la réforme des retraites, \
                    qui sont contestées par les syndicats.";
        assert_eq!(StopwordDetector::default().detect(text), Some("fr".to_string()));
    }

    #[test]
    fn english() {
        let text = "The government presented the outline of the pension reform on Tuesday, \
                    which has been contested by the unions.";
        assert_eq!(StopwordDetector::default().detect(text), Some("en".to_string()));
    }

    #[test]
    fn german() {
        let text = "Die Regierung hat am Dienstag die Grundzüge der Rentenreform vorgestellt, \
                    die von den Gewerkschaften nicht akzeptiert wird.";
        assert_eq!(StopwordDetector::default().detect(text), Some("de".to_string()));
    }

    #[test]
    fn too_short() {
        assert_eq!(StopwordDetector::default().detect("le la les"), None);
        assert_eq!(StopwordDetector::default().detect(""), None);
    }

    #[test]
    fn no_stopwords() {
        let text = "xyzzy plugh frobnicate quux wibble wobble";
        assert_eq!(StopwordDetector::default().detect(text), None);
    }
}
