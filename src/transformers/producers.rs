//! Output kind -> transformer registry.
use std::collections::HashMap;
use std::sync::Arc;

use super::{
    CsvTransformer, GephiTransformer, IramuteqTransformer, JsonTransformer, MarkdownTransformer,
    OutputKind, PlotsTransformer, ProcessedStatsTransformer, StatsJsonTransformer, StatsTransform,
    Transform, TxmTransformer,
};

/// A transformer, either working on the corpus or on its statistics.
#[derive(Clone)]
pub enum Producer {
    Corpus(Arc<dyn Transform + Send + Sync>),
    Stats(Arc<dyn StatsTransform + Send + Sync>),
}

impl Producer {
    pub fn needs_stats(&self) -> bool {
        matches!(self, Producer::Stats(_))
    }
}

/// Registered producers.
///
/// [Producers::default] covers every [OutputKind], entries can be replaced with [Producers::insert].
#[derive(Clone)]
pub struct Producers(HashMap<OutputKind, Producer>);

impl Producers {
    /// registry without any producer.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, kind: OutputKind) -> Option<&Producer> {
        self.0.get(&kind)
    }

    /// register (or replace) the producer of a kind.
    pub fn insert(&mut self, kind: OutputKind, producer: Producer) -> Option<Producer> {
        self.0.insert(kind, producer)
    }
}

impl Default for Producers {
    fn default() -> Self {
        let mut producers = Self::empty();
        producers.insert(OutputKind::Json, Producer::Corpus(Arc::new(JsonTransformer)));
        producers.insert(OutputKind::Txm, Producer::Corpus(Arc::new(TxmTransformer)));
        producers.insert(OutputKind::Iramuteq, Producer::Corpus(Arc::new(IramuteqTransformer)));
        producers.insert(OutputKind::Gephi, Producer::Corpus(Arc::new(GephiTransformer)));
        producers.insert(OutputKind::Csv, Producer::Corpus(Arc::new(CsvTransformer)));
        producers.insert(OutputKind::Markdown, Producer::Corpus(Arc::new(MarkdownTransformer)));
        producers.insert(OutputKind::Stats, Producer::Stats(Arc::new(StatsJsonTransformer)));
        producers.insert(
            OutputKind::ProcessedStats,
            Producer::Stats(Arc::new(ProcessedStatsTransformer)),
        );
        producers.insert(OutputKind::Plots, Producer::Stats(Arc::new(PlotsTransformer::default())));
        producers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_catalogue() {
        let producers = Producers::default();
        for kind in OutputKind::ALL {
            let producer = producers.get(kind).unwrap();
            assert_eq!(producer.needs_stats(), kind.is_stats(), "{kind}");
        }
    }

    #[test]
    fn empty_registry() {
        assert!(Producers::empty().get(OutputKind::Json).is_none());
    }
}
