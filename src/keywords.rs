/*! Keyword extraction

Keywords are title words that are echoed in the article body.
!*/
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = [
        // fr
        "avec", "dans", "pour", "sans", "sous", "leur", "leurs", "cette", "comme", "mais",
        "elle", "elles", "nous", "vous", "sont", "était", "être", "avoir", "plus", "moins",
        "tout", "tous", "toute", "toutes", "entre", "après", "avant", "depuis", "chez", "selon",
        // en
        "with", "from", "that", "this", "have", "been", "were", "what", "when", "which",
        "their", "there", "they", "will", "would", "about", "after", "into", "over", "than",
    ]
    .into_iter()
    .collect();
}

pub trait KeywordExtractor {
    /// returns keywords for an article, most relevant first.
    fn extract(&self, title: &str, text: &str) -> Vec<String>;
}

/// Keeps title words that are also present in the text,
/// ranked by their number of occurrences in the text.
pub struct TitleOverlap {
    min_len: usize,
    max_keywords: usize,
}

impl TitleOverlap {
    pub fn new(min_len: usize, max_keywords: usize) -> Self {
        Self {
            min_len,
            max_keywords,
        }
    }

    fn is_candidate(&self, word: &str) -> bool {
        word.chars().count() >= self.min_len
            && !STOPWORDS.contains(word)
            && !word.chars().all(|c| c.is_numeric())
    }
}

impl Default for TitleOverlap {
    /// words of at least 4 chars, 10 keywords max.
    fn default() -> Self {
        Self::new(4, 10)
    }
}

impl KeywordExtractor for TitleOverlap {
    fn extract(&self, title: &str, text: &str) -> Vec<String> {
        // title candidates, in order of appearance
        let mut seen = HashSet::new();
        let candidates: Vec<String> = title
            .unicode_words()
            .map(str::to_lowercase)
            .filter(|w| self.is_candidate(w))
            .filter(|w| seen.insert(w.clone()))
            .collect();

        if candidates.is_empty() {
            return Vec::new();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for word in text.unicode_words() {
            let word = word.to_lowercase();
            if seen.contains(&word) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<String> = candidates
            .into_iter()
            .filter(|w| counts.contains_key(w))
            .collect();
        // stable sort keeps title order for equal counts
        ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
        ranked.truncate(self.max_keywords);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_by_body_frequency() {
        let kw = TitleOverlap::default().extract(
            "Réforme des retraites : le gouvernement maintient le cap",
            "Le gouvernement a confirmé la réforme. La réforme des retraites sera votée. \
             La réforme est contestée.",
        );
        assert_eq!(kw, vec!["réforme", "retraites", "gouvernement"]);
    }

    #[test]
    fn stopwords_and_short_words_are_ignored() {
        let kw = TitleOverlap::default().extract("Dans la ville avec 2024 élus", "dans la ville avec 2024 élus");
        assert_eq!(kw, vec!["ville", "élus"]);
    }

    #[test]
    fn empty_title() {
        assert!(TitleOverlap::default().extract("", "some body text").is_empty());
    }

    #[test]
    fn capped() {
        let kw = TitleOverlap::new(1, 2).extract("alpha beta gamma", "alpha beta gamma");
        assert_eq!(kw.len(), 2);
    }
}
