//! # Europarser
//!
//! ```sh
//! europarser 0.1.0
//! press archive to text-analysis corpora.
//!
//! USAGE:
//!     europarser <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     help        Prints this message or the help of the given subcommand(s)
//!     pipeline    Extract, merge and export
//!     pivot       Extract and merge, then dump the corpus
//! ```
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
#[cfg(feature = "fasttext")]
use std::sync::Arc;

use europarser::config::PipelineConfig;
use europarser::error::Error;
#[cfg(feature = "fasttext")]
use europarser::identifiers::FastTextDetector;
use europarser::io::persist_json;
use europarser::pipeline::{DocumentFailure, EuropressePipeline, PipelineReport};
use europarser::pivot::{PivotExtractor, RawDocument};
use europarser::transformers::{OutputKind, Producers};
use structopt::StructOpt;
use tokio_util::sync::CancellationToken;

#[macro_use]
extern crate log;

mod cli;

/// environment fallback of `--dump-dir`.
const DUMP_DIR_VAR: &str = "EUROPARSER_OUTPUT";

/// Extractor using the fasttext model when one is provided.
fn build_extractor(workers: &cli::Workers) -> Result<PivotExtractor, Error> {
    #[cfg(feature = "fasttext")]
    if let Some(lid_path) = &workers.lid_path {
        info!("using fasttext model {:?}", lid_path);
        let detector = FastTextDetector::new(lid_path, workers.lid_threshold)?;
        return PivotExtractor::with_language(Arc::new(detector));
    }
    #[cfg(not(feature = "fasttext"))]
    let _ = workers;

    PivotExtractor::new()
}

/// Read every file matched by the provided patterns.
///
/// Files that can't be read, or aren't utf-8, are reported as failures.
fn read_sources(patterns: &[String]) -> Result<(Vec<RawDocument>, Vec<DocumentFailure>), Error> {
    let mut documents = Vec::new();
    let mut failures = Vec::new();

    for pattern in patterns {
        let mut matched = 0;
        for entry in glob::glob(pattern)? {
            matched += 1;
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    error!("{}", e);
                    failures.push(DocumentFailure {
                        name: e.path().display().to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            let name = path.display().to_string();
            match fs::read(&path).map_err(Error::from).and_then(|bytes| {
                String::from_utf8(bytes).map_err(Error::from)
            }) {
                Ok(content) => documents.push(RawDocument::new(name, content)),
                Err(e) => {
                    error!("could not read {}: {}", name, e);
                    failures.push(DocumentFailure {
                        name,
                        message: e.to_string(),
                    });
                }
            }
        }
        if matched == 0 {
            warn!("{} did not match any file", pattern);
        }
    }

    info!("read {} documents", documents.len());
    Ok((documents, failures))
}

/// one line per diagnostic, in `<dst>/errors.txt`.
fn write_errors(report: &PipelineReport, dst: &Path) -> Result<(), Error> {
    let diagnostics = report.diagnostics();
    let mut error_file = File::create(dst.join("errors.txt"))?;
    for line in &diagnostics {
        writeln!(error_file, "{}", line)?;
    }
    if !diagnostics.is_empty() {
        warn!("{} diagnostics written to errors.txt", diagnostics.len());
    }
    Ok(())
}

/// Cancel the token on ctrl-c.
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping at the next article");
            cancel.cancel();
        }
    });
    token
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Europarser::from_args();
    debug!("cli args\n{:#?}", opt);

    let token = cancel_on_ctrl_c();

    match opt {
        cli::Europarser::Pipeline(p) => {
            let (documents, read_failures) = read_sources(&p.src)?;
            let outputs = if p.outputs.is_empty() {
                OutputKind::ALL.to_vec()
            } else {
                p.outputs
            };

            let pipeline = EuropressePipeline::new(
                PipelineConfig::from(&p.workers),
                build_extractor(&p.workers)?,
                Producers::default(),
            );
            let mut report = pipeline.run(documents, &outputs, &token).await;
            report.document_failures.extend(read_failures);

            fs::create_dir_all(&p.dst)?;
            for output in report.outputs() {
                let path = p.dst.join(&output.filename);
                fs::write(&path, &output.data)?;
                info!("wrote {:?}", path);
            }
            write_errors(&report, &p.dst)?;

            let dump_dir = p
                .dump_dir
                .or_else(|| std::env::var_os(DUMP_DIR_VAR).map(PathBuf::from));
            match dump_dir {
                Some(dir) => {
                    if let Err(e) = persist_json(&report.corpus, &dir) {
                        error!("could not dump corpus to {:?}: {}", dir, e);
                    }
                }
                None => warn!("no dump folder (--dump-dir or ${}), skipping dump", DUMP_DIR_VAR),
            }
        }

        cli::Europarser::Pivot(p) => {
            let (documents, read_failures) = read_sources(&p.src)?;
            let pipeline = EuropressePipeline::new(
                PipelineConfig::from(&p.workers),
                build_extractor(&p.workers)?,
                Producers::default(),
            );
            let mut report = pipeline.build_corpus(documents, &token).await;
            report.document_failures.extend(read_failures);

            let path = persist_json(&report.corpus, &p.dst)?;
            println!("{}", path.display());
            write_errors(&report, &p.dst)?;
        }
    };
    Ok(())
}
