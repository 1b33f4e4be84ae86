/*! Corpus processing

Merging of the per-document extractions into a single, deduplicated and ordered corpus.
!*/
pub mod merge;

pub use merge::{merge, Corpus};
