//! Word segmentation used to cut text into lookup tokens.
//!
//! The conversion pipeline only needs "split text into an ordered sequence of
//! substrings". [`Segmenter`] captures that contract; [`JiebaSegmenter`] is the
//! default implementation and [`CharSegmenter`] is the trivial one-token-per-char
//! tokenizer. Plain functions of type `fn(&str) -> Vec<&str>` are segmenters too.
//!
//! All segmenters are `Send + Sync` and take `&self`, so a single instance can
//! serve any number of concurrent conversions.

use std::fmt;
use std::io::BufRead;

use jieba_rs::Jieba;

/// Splits text into tokens.
///
/// Implementations must be deterministic (same input, same tokens) and must not
/// drop characters that should appear in the output: the pipeline concatenates
/// the converted tokens verbatim.
pub trait Segmenter: Send + Sync {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

impl<F> Segmenter for F
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str> + Send + Sync,
{
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self(text)
    }
}

/// Jieba-backed segmenter (default).
///
/// HMM-based discovery of unknown words is on by default, matching
/// `Jieba::cut(text, true)`.
///
/// ```
/// use opencc_wordseg::segmenter::{JiebaSegmenter, Segmenter};
///
/// let seg = JiebaSegmenter::new();
/// let tokens = seg.segment("我们中出了一个叛徒");
/// assert_eq!(tokens.concat(), "我们中出了一个叛徒");
/// ```
pub struct JiebaSegmenter {
    jieba: Jieba,
    hmm: bool,
}

impl JiebaSegmenter {
    /// Builds a segmenter over jieba's bundled dictionary.
    pub fn new() -> Self {
        Self {
            jieba: Jieba::new(),
            hmm: true,
        }
    }

    /// Builds a segmenter over a custom jieba dictionary
    /// (`word [freq] [tag]` per line).
    pub fn with_dict<R: BufRead>(dict: &mut R) -> Result<Self, jieba_rs::Error> {
        Ok(Self {
            jieba: Jieba::with_dict(dict)?,
            hmm: true,
        })
    }

    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    pub fn hmm(&self) -> bool {
        self.hmm
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JiebaSegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiebaSegmenter")
            .field("hmm", &self.hmm)
            .finish_non_exhaustive()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.jieba.cut(text, self.hmm)
    }
}

/// One token per `char`. Phrase tables only ever match single-character keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharSegmenter;

impl Segmenter for CharSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.char_indices()
            .map(|(i, ch)| &text[i..i + ch.len_utf8()])
            .collect()
    }
}
