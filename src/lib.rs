/*! # Europarser

Turns press archive exports (Europresse HTML) into text-analysis corpora.

Every `<article>` of the input documents is extracted into a [pivot::Pivot] record,
records are merged into a deduplicated, chronological [processing::Corpus], which
is then exported to the requested formats (TXM, Iramuteq, Gephi, csv, json, statistics...).

```no_run
use europarser::pipeline::EuropressePipeline;
use europarser::pivot::RawDocument;
use europarser::transformers::OutputKind;
use tokio_util::sync::CancellationToken;

# async fn run() -> Result<(), europarser::error::Error> {
let pipeline = EuropressePipeline::with_defaults()?;
let docs = vec![RawDocument::new("export.html", std::fs::read_to_string("export.html")?)];
let report = pipeline
    .run(docs, &[OutputKind::Txm, OutputKind::Stats], &CancellationToken::new())
    .await;
for output in report.outputs() {
    println!("{}: {} bytes", output.filename, output.data.len());
}
# Ok(())
# }
```
!*/
pub mod config;
pub mod date;
pub mod error;
pub mod identifiers;
pub mod io;
pub mod keywords;
pub mod pipeline;
pub mod pivot;
pub mod processing;
pub mod transformers;
