/*! Corpus statistics

[Stats] are computed once per run with a parallel fold over the corpus,
and then rendered by the statistics-based transformers:

- [StatsJsonTransformer]: raw counts
- [ProcessedStatsTransformer]: shares and top entries
- [PlotsTransformer]: articles per month, as an svg bar chart
!*/
use std::collections::BTreeMap;
use std::fmt::Write;

use quick_xml::escape::escape;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{OutputFormat, StatsTransform};
use crate::error::Error;
use crate::pivot::Pivot;

/// number of entries kept in processed rankings.
const TOP: usize = 10;
/// room left under the bars for month labels.
const LABEL_HEIGHT: usize = 40;

/// Counts over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub dated: usize,
    pub undated: usize,
    pub journals: BTreeMap<String, usize>,
    /// `YYYY-MM` -> count
    pub months: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    pub authors: BTreeMap<String, usize>,
    pub keywords: BTreeMap<String, usize>,
}

fn add_all(into: &mut BTreeMap<String, usize>, from: BTreeMap<String, usize>) {
    for (k, v) in from {
        *into.entry(k).or_insert(0) += v;
    }
}

impl Stats {
    pub fn compute(corpus: &[Pivot]) -> Self {
        corpus
            .par_iter()
            .fold(Stats::default, |mut stats, pivot| {
                stats.add(pivot);
                stats
            })
            .reduce(Stats::default, Stats::merge)
    }

    fn add(&mut self, pivot: &Pivot) {
        self.total += 1;
        match &pivot.date {
            Some(date) => {
                self.dated += 1;
                *self
                    .months
                    .entry(format!("{:04}-{:02}", date.year, date.month))
                    .or_insert(0) += 1;
            }
            None => self.undated += 1,
        }
        *self.journals.entry(pivot.journal_clean.clone()).or_insert(0) += 1;
        *self.languages.entry(pivot.language.clone()).or_insert(0) += 1;
        *self.authors.entry(pivot.author.clone()).or_insert(0) += 1;
        for keyword in pivot.keywords.split(',').map(str::trim).filter(|k| !k.is_empty()) {
            *self.keywords.entry(keyword.to_string()).or_insert(0) += 1;
        }
    }

    fn merge(mut self, other: Stats) -> Stats {
        self.total += other.total;
        self.dated += other.dated;
        self.undated += other.undated;
        add_all(&mut self.journals, other.journals);
        add_all(&mut self.months, other.months);
        add_all(&mut self.languages, other.languages);
        add_all(&mut self.authors, other.authors);
        add_all(&mut self.keywords, other.keywords);
        self
    }
}

#[derive(Default)]
pub struct StatsJsonTransformer;

impl StatsTransform for StatsJsonTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn transform(&self, stats: &Stats) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(stats)?)
    }
}

#[derive(Debug, Serialize)]
struct Share {
    name: String,
    count: usize,
    /// percentage of the articles
    share: f64,
}

#[derive(Debug, Serialize)]
struct ProcessedStats {
    total: usize,
    dated_share: f64,
    first_month: Option<String>,
    last_month: Option<String>,
    top_journals: Vec<Share>,
    top_languages: Vec<Share>,
    top_authors: Vec<Share>,
    top_keywords: Vec<Share>,
}

#[derive(Default)]
pub struct ProcessedStatsTransformer;

impl ProcessedStatsTransformer {
    fn percent(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (count as f64 * 10000.0 / total as f64).round() / 100.0
        }
    }

    /// highest counts first, ties in name order.
    fn top(counts: &BTreeMap<String, usize>, total: usize) -> Vec<Share> {
        let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .take(TOP)
            .map(|(name, count)| Share {
                name: name.clone(),
                count: *count,
                share: Self::percent(*count, total),
            })
            .collect()
    }
}

impl StatsTransform for ProcessedStatsTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn transform(&self, stats: &Stats) -> Result<String, Error> {
        let processed = ProcessedStats {
            total: stats.total,
            dated_share: Self::percent(stats.dated, stats.total),
            first_month: stats.months.keys().next().cloned(),
            last_month: stats.months.keys().next_back().cloned(),
            top_journals: Self::top(&stats.journals, stats.total),
            top_languages: Self::top(&stats.languages, stats.total),
            top_authors: Self::top(&stats.authors, stats.total),
            top_keywords: Self::top(&stats.keywords, stats.total),
        };
        Ok(serde_json::to_string_pretty(&processed)?)
    }
}

/// Bar chart of the number of articles per month.
pub struct PlotsTransformer {
    bar_width: usize,
    height: usize,
}

impl Default for PlotsTransformer {
    fn default() -> Self {
        Self {
            bar_width: 24,
            height: 200,
        }
    }
}

impl StatsTransform for PlotsTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xml
    }

    fn transform(&self, stats: &Stats) -> Result<String, Error> {
        let max = stats.months.values().copied().max().unwrap_or(0).max(1);
        let width = (stats.months.len() * self.bar_width).max(self.bar_width);
        let mut svg = String::new();

        writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{}\">",
            self.height + LABEL_HEIGHT
        )?;
        for (i, (month, count)) in stats.months.iter().enumerate() {
            let bar = count * self.height / max;
            let x = i * self.bar_width;
            writeln!(
                svg,
                "<g><title>{month}: {count}</title><rect x=\"{x}\" y=\"{}\" width=\"{}\" height=\"{bar}\"/>\
                 <text x=\"{x}\" y=\"{}\" font-size=\"8\">{}</text></g>",
                self.height - bar,
                self.bar_width - 2,
                self.height + 12,
                escape(month.as_str()),
            )?;
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
