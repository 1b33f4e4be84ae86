//! fasttext backed language detection.
use std::path::Path;

use fasttext::FastText as FastTextLib;
use log::error;

use super::LanguageDetector;
use crate::error::Error;

/// prefix of fasttext labels, `__label__fr`.
const LABEL_PREFIX: &str = "__label__";

/// Language detection using a fasttext language identification model (`lid.176.bin`).
pub struct FastTextDetector {
    inner: FastTextLib,
    threshold: f32,
}

impl FastTextDetector {
    pub fn new(model_path: &Path, threshold: f32) -> Result<Self, Error> {
        let path = model_path
            .to_str()
            .ok_or_else(|| Error::Custom(format!("Could not parse path {model_path:?}")))?;
        let mut inner = FastTextLib::new();
        inner.load_model(path)?;
        Ok(Self { inner, threshold })
    }
}

impl LanguageDetector for FastTextDetector {
    fn detect(&self, text: &str) -> Option<String> {
        // fasttext predicts on a single line.
        let line = text.replace(['\n', '\r', char::from(0)], " ");
        match self.inner.predict(&line, 1, self.threshold) {
            Ok(predictions) => predictions.into_iter().next().map(|p| {
                p.label
                    .strip_prefix(LABEL_PREFIX)
                    .unwrap_or(&p.label)
                    .to_string()
            }),
            Err(e) => {
                error!("fasttext prediction failed: {e}");
                None
            }
        }
    }
}
