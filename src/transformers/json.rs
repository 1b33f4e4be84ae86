//! Pivot export, as a json array.
use super::{OutputFormat, Transform};
use crate::error::Error;
use crate::pivot::Pivot;

#[derive(Default)]
pub struct JsonTransformer;

impl Transform for JsonTransformer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn transform(&self, corpus: &[Pivot]) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(corpus)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformers::test_utils::corpus;

    #[test]
    fn roundtrip() {
        let corpus = corpus();
        let out = JsonTransformer.transform(&corpus).unwrap();
        let back: Vec<Pivot> = serde_json::from_str(&out).unwrap();
        assert_eq!(back, corpus);
    }
}
