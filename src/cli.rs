//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;
use std::time::Duration;

use europarser::config::PipelineConfig;
use europarser::transformers::OutputKind;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "europarser", about = "press archive to text-analysis corpora.")]
/// Holds every command that is callable by the `europarser` command.
pub enum Europarser {
    #[structopt(about = "Extract, merge and export")]
    Pipeline(Pipeline),
    #[structopt(about = "Extract and merge, then dump the corpus")]
    Pivot(Pivot),
}

#[derive(Debug, StructOpt)]
/// Worker pools and language identification parameters, shared by both commands.
pub struct Workers {
    #[structopt(
        short = "w",
        long = "extract-workers",
        help = "number of documents extracted concurrently",
        default_value = "5"
    )]
    pub extract_workers: usize,
    #[structopt(
        short = "x",
        long = "export-workers",
        help = "number of outputs produced concurrently",
        default_value = "5"
    )]
    pub export_workers: usize,
    #[structopt(long = "extract-timeout", help = "per-document timeout, in seconds")]
    pub extract_timeout: Option<u64>,
    #[structopt(long = "export-timeout", help = "per-output timeout, in seconds")]
    pub export_timeout: Option<u64>,
    #[cfg(feature = "fasttext")]
    #[structopt(
        parse(from_os_str),
        long = "lid-path",
        help = "Path to lid.176.bin. Stop word detection is used when missing."
    )]
    pub lid_path: Option<PathBuf>,
    #[cfg(feature = "fasttext")]
    #[structopt(
        long = "lid-threshold",
        help = "fasttext prediction threshold",
        default_value = "0.8"
    )]
    pub lid_threshold: f32,
}

impl From<&Workers> for PipelineConfig {
    fn from(w: &Workers) -> Self {
        PipelineConfig::new(
            w.extract_workers,
            w.export_workers,
            w.extract_timeout.map(Duration::from_secs),
            w.export_timeout.map(Duration::from_secs),
        )
    }
}

#[derive(Debug, StructOpt)]
/// Pipeline command and parameters.
///
/// ```sh
/// europarser-pipeline 0.1.0
/// Extract, merge and export
///
/// USAGE:
///     europarser pipeline [OPTIONS] <dst> <src>...
///
/// OPTIONS:
///     -o, --output <outputs>...    requested outputs (json, txm, iramuteq, gephi, csv, stats,
///                                  processed_stats, plots, markdown). Default is all of them.
///         --dump-dir <dump-dir>    diagnostic dump folder. Falls back to $EUROPARSER_OUTPUT.
///
/// ARGS:
///     <dst>       output folder
///     <src>...    source files or glob patterns
/// ```
pub struct Pipeline {
    #[structopt(parse(from_os_str), help = "output folder")]
    pub dst: PathBuf,
    #[structopt(help = "source files or glob patterns", required = true)]
    pub src: Vec<String>,
    #[structopt(
        short = "o",
        long = "output",
        number_of_values = 1,
        help = "requested outputs. Default is all of them."
    )]
    pub outputs: Vec<OutputKind>,
    #[structopt(
        long = "dump-dir",
        parse(from_os_str),
        help = "diagnostic dump folder. Falls back to $EUROPARSER_OUTPUT."
    )]
    pub dump_dir: Option<PathBuf>,
    #[structopt(flatten)]
    pub workers: Workers,
}

#[derive(Debug, StructOpt)]
/// Pivot command and parameters.
pub struct Pivot {
    #[structopt(parse(from_os_str), help = "dump folder")]
    pub dst: PathBuf,
    #[structopt(help = "source files or glob patterns", required = true)]
    pub src: Vec<String>,
    #[structopt(flatten)]
    pub workers: Workers,
}
