/*! Two-stage pipeline

1. extraction: one unit per document, at most `extract_workers` at once.
1. merge: waits for every document.
1. export: one unit per requested kind, at most `export_workers` at once.
   Statistics are computed once beforehand if any requested kind needs them.

Units run on the blocking pool. Failures, panics and timeouts are recorded per unit
and never abort the siblings.
!*/
use std::collections::BTreeSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, error, info};
use tokio_util::sync::CancellationToken;

use super::pool::run_unit;
use super::report::{DocumentFailure, ExportFailure, ExportResult, PipelineReport};
use crate::config::PipelineConfig;
use crate::error::Error;
use crate::pivot::{Extraction, PivotExtractor, RawDocument};
use crate::processing::{merge, Corpus};
use crate::transformers::{OutputKind, Producer, Producers, Stats, TransformerOutput};

pub struct EuropressePipeline {
    config: PipelineConfig,
    extractor: Arc<PivotExtractor>,
    producers: Producers,
}

impl EuropressePipeline {
    pub fn new(config: PipelineConfig, extractor: PivotExtractor, producers: Producers) -> Self {
        Self {
            config,
            extractor: Arc::new(extractor),
            producers,
        }
    }

    /// Pipeline with the default configuration, rules and producers.
    pub fn with_defaults() -> Result<Self, Error> {
        Ok(Self::new(
            PipelineConfig::default(),
            PivotExtractor::new()?,
            Producers::default(),
        ))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract every document.
    ///
    /// Extractions are returned in document order, whatever the completion order.
    pub async fn extract_documents(
        &self,
        documents: Vec<RawDocument>,
        token: &CancellationToken,
    ) -> (Vec<Extraction>, Vec<DocumentFailure>) {
        let nb_documents = documents.len();
        let timeout = self.config.extract_timeout;

        let mut done: Vec<(usize, Result<Extraction, DocumentFailure>)> =
            stream::iter(documents.into_iter().enumerate())
                .map(|(idx, doc)| {
                    let extractor = Arc::clone(&self.extractor);
                    let unit_token = token.child_token();
                    async move {
                        let name = doc.name.clone();
                        let res = run_unit(
                            &name,
                            move |t| extractor.extract_cancellable(&doc, &t),
                            timeout,
                            unit_token,
                        )
                        .await
                        .map_err(|e| {
                            error!("[{}] extraction failed: {}", name, e);
                            DocumentFailure {
                                name: name.clone(),
                                message: e.to_string(),
                            }
                        });
                        (idx, res)
                    }
                })
                .buffer_unordered(self.config.extract_workers.max(1))
                .collect()
                .await;

        done.sort_unstable_by_key(|(idx, _)| *idx);

        let mut extractions = Vec::with_capacity(nb_documents);
        let mut failures = Vec::new();
        for (_, res) in done {
            match res {
                Ok(extraction) => extractions.push(extraction),
                Err(failure) => failures.push(failure),
            }
        }

        info!(
            "extracted {}/{} documents",
            extractions.len(),
            nb_documents
        );
        (extractions, failures)
    }

    /// Extraction then merge, without any export.
    pub async fn build_corpus(
        &self,
        documents: Vec<RawDocument>,
        token: &CancellationToken,
    ) -> PipelineReport {
        let (extractions, document_failures) = self.extract_documents(documents, token).await;

        let mut batches = Vec::with_capacity(extractions.len());
        let mut extraction_errors = Vec::new();
        for extraction in extractions {
            batches.push(extraction.records);
            extraction_errors.extend(extraction.errors);
        }

        PipelineReport {
            corpus: merge(batches),
            extraction_errors,
            document_failures,
            results: Vec::new(),
        }
    }

    /// Produce every requested kind from the corpus.
    ///
    /// Each requested kind gets exactly one entry, repeated kinds are only produced once.
    pub async fn export(
        &self,
        corpus: Arc<Corpus>,
        kinds: &[OutputKind],
        token: &CancellationToken,
    ) -> Vec<ExportResult> {
        let kinds: BTreeSet<OutputKind> = kinds.iter().copied().collect();
        let timeout = self.config.export_timeout;

        let needs_stats = kinds
            .iter()
            .filter_map(|kind| self.producers.get(*kind))
            .any(Producer::needs_stats);
        let stats = if needs_stats {
            let corpus = Arc::clone(&corpus);
            let stats = run_unit(
                "stats",
                move |_| Ok(Stats::compute(&corpus)),
                None,
                token.child_token(),
            )
            .await
            .map(Arc::new)
            .map_err(|e| e.to_string());
            Some(stats)
        } else {
            None
        };

        let results: Vec<ExportResult> = stream::iter(kinds)
            .map(|kind| {
                let producer = self.producers.get(kind).cloned();
                let corpus = Arc::clone(&corpus);
                let stats = stats.clone();
                let unit_token = token.child_token();
                async move {
                    let Some(producer) = producer else {
                        error!("[{}] no producer registered", kind);
                        return Err(ExportFailure {
                            kind,
                            message: "no producer registered".to_string(),
                        });
                    };

                    let work = move |t: CancellationToken| -> Result<TransformerOutput, Error> {
                        if t.is_cancelled() {
                            return Err(Error::Cancelled);
                        }
                        let (format, data) = match producer {
                            Producer::Corpus(p) => (p.format(), p.transform(&corpus)?),
                            Producer::Stats(p) => {
                                let stats = match stats {
                                    Some(Ok(stats)) => stats,
                                    Some(Err(e)) => {
                                        return Err(Error::Custom(format!("statistics: {e}")))
                                    }
                                    None => Arc::new(Stats::compute(&corpus)),
                                };
                                (p.format(), p.transform(&stats)?)
                            }
                        };
                        Ok(TransformerOutput::new(kind, format, data))
                    };

                    run_unit(kind.name(), work, timeout, unit_token)
                        .await
                        .map(|output| {
                            debug!("[{}] produced {} bytes", kind, output.data.len());
                            output
                        })
                        .map_err(|e| {
                            error!("[{}] export failed: {}", kind, e);
                            ExportFailure {
                                kind,
                                message: e.to_string(),
                            }
                        })
                }
            })
            .buffer_unordered(self.config.export_workers.max(1))
            .collect()
            .await;

        info!(
            "exported {}/{} outputs",
            results.iter().filter(|r| r.is_ok()).count(),
            results.len()
        );
        results
    }

    /// Full run: extraction, merge and export.
    pub async fn run(
        &self,
        documents: Vec<RawDocument>,
        kinds: &[OutputKind],
        token: &CancellationToken,
    ) -> PipelineReport {
        let report = self.build_corpus(documents, token).await;

        let corpus = Arc::new(report.corpus);
        let results = self.export(Arc::clone(&corpus), kinds, token).await;
        let corpus = Arc::try_unwrap(corpus).unwrap_or_else(|shared| (*shared).clone());

        PipelineReport {
            corpus,
            results,
            ..report
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::identifiers::LanguageDetector;
    use crate::pivot::Pivot;
    use crate::transformers::{OutputFormat, Transform};

    const ARTICLE: &str = r#"<article>
        <span class="DocPublicationName">Le Monde</span>
        <span class="DocHeader">lundi 3 janvier 2022</span>
        <div class="titreArticle"><p class="sm-margin-TopNews titreArticleVisu rdp__articletitle">Titre</p></div>
        <div class="docOcurrContainer">Corps</div>
    </article>"#;

    struct Failing;

    impl Transform for Failing {
        fn format(&self) -> OutputFormat {
            OutputFormat::Txt
        }

        fn transform(&self, _: &[Pivot]) -> Result<String, Error> {
            Err(Error::Custom("forced failure".to_string()))
        }
    }

    struct Slow;

    impl Transform for Slow {
        fn format(&self) -> OutputFormat {
            OutputFormat::Txt
        }

        fn transform(&self, _: &[Pivot]) -> Result<String, Error> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(String::new())
        }
    }

    struct Panicking;

    impl Transform for Panicking {
        fn format(&self) -> OutputFormat {
            OutputFormat::Txt
        }

        fn transform(&self, _: &[Pivot]) -> Result<String, Error> {
            panic!("producer panicked")
        }
    }

    fn pipeline(config: PipelineConfig, producers: Producers) -> EuropressePipeline {
        EuropressePipeline::new(config, PivotExtractor::new().unwrap(), producers)
    }

    fn doc(name: &str) -> RawDocument {
        RawDocument::new(name, format!("<html><body>{ARTICLE}</body></html>"))
    }

    #[tokio::test]
    async fn document_order_is_kept() {
        let p = pipeline(PipelineConfig::default(), Producers::default());
        let docs = (0..20)
            .map(|i| RawDocument::new(format!("{i}"), ARTICLE.replace("Titre", &format!("T{i}"))))
            .collect();
        let (extractions, failures) = p.extract_documents(docs, &CancellationToken::new()).await;
        assert!(failures.is_empty());
        let titles: Vec<String> = extractions
            .iter()
            .map(|e| e.records[0].title.clone())
            .collect();
        let expected: Vec<String> = (0..20).map(|i| format!("T{i}")).collect();
        assert_eq!(titles, expected);
    }

    #[tokio::test]
    async fn failing_producer_is_isolated() {
        let mut producers = Producers::default();
        producers.insert(OutputKind::Gephi, Producer::Corpus(Arc::new(Failing)));
        let p = pipeline(PipelineConfig::default(), producers);

        let report = p
            .run(
                vec![doc("a")],
                &[OutputKind::Json, OutputKind::Gephi, OutputKind::Stats],
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.outputs().count(), 2);
        let failures: Vec<_> = report.export_failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, OutputKind::Gephi);
        assert!(failures[0].message.contains("forced failure"));
    }

    #[tokio::test]
    async fn export_timeout() {
        let mut producers = Producers::default();
        producers.insert(OutputKind::Markdown, Producer::Corpus(Arc::new(Slow)));
        let config = PipelineConfig::default().with_export_timeout(Duration::from_millis(20));
        let p = pipeline(config, producers);

        let results = p
            .export(
                Arc::new(Corpus::default()),
                &[OutputKind::Markdown, OutputKind::Json],
                &CancellationToken::new(),
            )
            .await;
        let failure = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert_eq!(failure.kind, OutputKind::Markdown);
        assert_eq!(failure.message, Error::Timeout.to_string());
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    }

    #[tokio::test]
    async fn panicking_producer() {
        let mut producers = Producers::default();
        producers.insert(OutputKind::Txm, Producer::Corpus(Arc::new(Panicking)));
        let p = pipeline(PipelineConfig::default(), producers);

        let results = p
            .export(
                Arc::new(Corpus::default()),
                &[OutputKind::Txm, OutputKind::Csv],
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(results.len(), 2);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
    }

    #[tokio::test]
    async fn missing_producer() {
        let p = pipeline(PipelineConfig::default(), Producers::empty());
        let results = p
            .export(
                Arc::new(Corpus::default()),
                &[OutputKind::Json],
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[tokio::test]
    async fn repeated_kinds_produced_once() {
        let p = pipeline(PipelineConfig::default(), Producers::default());
        let results = p
            .export(
                Arc::new(Corpus::default()),
                &[OutputKind::Json, OutputKind::Json],
                &CancellationToken::new(),
            )
            .await;
        assert_eq!(results.len(), 1);
    }

    /// panics on bodies containing "poison".
    struct PoisonedDetector;

    impl LanguageDetector for PoisonedDetector {
        fn detect(&self, text: &str) -> Option<String> {
            if text.contains("poison") {
                panic!("detector crashed");
            }
            None
        }
    }

    #[tokio::test]
    async fn failing_document_is_isolated() {
        let extractor = PivotExtractor::with_language(Arc::new(PoisonedDetector)).unwrap();
        let p = EuropressePipeline::new(PipelineConfig::default(), extractor, Producers::default());
        let docs = vec![
            RawDocument::new("a", ARTICLE.replace("Titre", "A")),
            RawDocument::new("b", ARTICLE.replace("Corps", "poison")),
            RawDocument::new("c", ARTICLE.replace("Titre", "C")),
        ];

        let report = p
            .run(docs, &[OutputKind::Json], &CancellationToken::new())
            .await;
        assert_eq!(report.document_failures.len(), 1);
        assert_eq!(report.document_failures[0].name, "b");
        let titles: Vec<&str> = report.corpus.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(report.outputs().count(), 1);
    }

    #[tokio::test]
    async fn cancelled_run() {
        let p = pipeline(PipelineConfig::default(), Producers::default());
        let token = CancellationToken::new();
        token.cancel();

        let report = p
            .run(vec![doc("a"), doc("b")], &[OutputKind::Json], &token)
            .await;
        assert!(report.corpus.is_empty());
        assert_eq!(report.document_failures.len(), 2);
        assert_eq!(report.document_failures[0].name, "a");
        assert_eq!(report.document_failures[0].message, Error::Cancelled.to_string());
        assert_eq!(report.results.len(), 1);
        assert!(report.results[0].is_err());
    }

    #[tokio::test]
    async fn single_worker() {
        let config = PipelineConfig::new(0, 0, None, None);
        let p = pipeline(config, Producers::default());
        let report = p
            .run(
                vec![doc("a"), doc("b")],
                &OutputKind::ALL,
                &CancellationToken::new(),
            )
            .await;
        // same article in both documents
        assert_eq!(report.corpus.len(), 1);
        assert_eq!(report.outputs().count(), OutputKind::ALL.len());
    }
}
