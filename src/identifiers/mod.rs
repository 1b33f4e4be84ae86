/*! Language identification

Holds a [LanguageDetector] trait for implementing other ones.

The default detector is a stop word counter ([StopwordDetector]).
A [fasttext](https://fasttext.cc) backed one is available with the `fasttext` feature.
!*/
#[cfg(feature = "fasttext")]
mod fasttext;
mod stopwords;

#[cfg(feature = "fasttext")]
pub use self::fasttext::FastTextDetector;
pub use stopwords::StopwordDetector;

pub trait LanguageDetector {
    /// returns a language tag (`fr`, `en`...), or [None] if the language could not be found.
    fn detect(&self, text: &str) -> Option<String>;
}
