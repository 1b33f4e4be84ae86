/*! Pivot extraction

Turns one raw press-archive HTML export into [Pivot] records.

The archive exports come from several incompatible templates,
so every field is looked up through an ordered list of locators (see [rules]).
A malformed article never aborts the document: it becomes an [ExtractionError]
and extraction carries on with the next `<article>`.
!*/
mod extractor;
pub mod rules;
mod types;

pub use extractor::PivotExtractor;
pub use types::{Extraction, ExtractionError, Pivot, PivotDate, RawDocument};
