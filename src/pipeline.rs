//! The conversion pipeline: stages of (phrase table, character table) applied
//! over segmented text.
//!
//! A [`Stage`] is declarative: it names dictionaries by [`DictionaryId`]. Before
//! any text is processed the stages are resolved against a
//! [`DictionaryStore`] into [`ResolvedStage`]s holding the loaded tables, so
//! dictionary errors surface up front and conversion itself cannot fail.
//!
//! Within one stage:
//! 1. the text is segmented once,
//! 2. each token is looked up whole in the phrase table,
//! 3. tokens without a phrase match are converted char by char through the
//!    character table; chars without a mapping pass through unchanged,
//! 4. the outputs are concatenated in token order.
//!
//! Stages chain: the output of stage *i* is the input of stage *i + 1*, and each
//! stage segments its own input afresh.

use std::sync::Arc;

use rayon::prelude::*;

use crate::dictionary_lib::{DictionaryError, DictionaryId, DictionaryStore, MappingTable};
use crate::segmenter::Segmenter;

/// Inputs at least this many bytes long are converted in parallel when the
/// converter has parallelism enabled.
pub const PARALLEL_THRESHOLD: usize = 1000;

/// One conversion stage, by dictionary name. `None` means "no table".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stage {
    pub phrases: Option<DictionaryId>,
    pub characters: Option<DictionaryId>,
}

impl Stage {
    pub const fn new(phrases: Option<DictionaryId>, characters: Option<DictionaryId>) -> Self {
        Self {
            phrases,
            characters,
        }
    }

    /// A stage with both a phrase and a character table.
    pub const fn pair(phrases: DictionaryId, characters: DictionaryId) -> Self {
        Self::new(Some(phrases), Some(characters))
    }

    /// A stage with only a character table.
    pub const fn characters(characters: DictionaryId) -> Self {
        Self::new(None, Some(characters))
    }

    /// Dictionaries referenced by this stage, phrase table first.
    pub fn dictionaries(&self) -> impl Iterator<Item = DictionaryId> {
        self.phrases.into_iter().chain(self.characters)
    }
}

/// A [`Stage`] with its tables loaded.
#[derive(Debug, Clone, Default)]
pub struct ResolvedStage {
    pub phrases: Option<Arc<MappingTable>>,
    pub characters: Option<Arc<MappingTable>>,
}

impl ResolvedStage {
    pub fn new(phrases: Option<Arc<MappingTable>>, characters: Option<Arc<MappingTable>>) -> Self {
        Self {
            phrases,
            characters,
        }
    }

    /// Loads (or fetches from cache) the tables `stage` names.
    pub fn resolve(stage: &Stage, store: &DictionaryStore) -> Result<Self, DictionaryError> {
        let phrases = stage.phrases.map(|id| store.get(id)).transpose()?;
        let characters = stage.characters.map(|id| store.get(id)).transpose()?;
        Ok(Self::new(phrases, characters))
    }

    /// Resolves a whole stage list, failing on the first dictionary error.
    pub fn resolve_all(
        stages: &[Stage],
        store: &DictionaryStore,
    ) -> Result<Vec<Self>, DictionaryError> {
        stages
            .iter()
            .map(|stage| Self::resolve(stage, store))
            .collect()
    }
}

/// Appends the conversion of one token to `out`.
///
/// Whole-token phrase match first; otherwise every char through the character
/// table, unmapped chars verbatim.
#[inline]
pub fn convert_token(token: &str, stage: &ResolvedStage, out: &mut String) {
    if let Some(phrases) = &stage.phrases {
        if let Some(value) = phrases.get(token) {
            out.push_str(value);
            return;
        }
    }

    match &stage.characters {
        Some(characters) => {
            for ch in token.chars() {
                match characters.get_char(ch) {
                    Some(value) => out.push_str(value),
                    None => out.push(ch),
                }
            }
        }
        None => out.push_str(token),
    }
}

/// Runs one stage over `text`.
pub fn apply_stage(
    text: &str,
    stage: &ResolvedStage,
    segmenter: &dyn Segmenter,
    parallel: bool,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let tokens = segmenter.segment(text);

    if parallel && text.len() >= PARALLEL_THRESHOLD {
        tokens
            .par_iter()
            .map(|token| {
                let mut converted = String::with_capacity(token.len());
                convert_token(token, stage, &mut converted);
                converted
            })
            .collect::<Vec<String>>()
            .concat()
    } else {
        let mut result = String::with_capacity(text.len());
        for token in tokens {
            convert_token(token, stage, &mut result);
        }
        result
    }
}

/// Threads `text` through `stages` in order.
pub fn apply_stages(
    text: &str,
    stages: &[ResolvedStage],
    segmenter: &dyn Segmenter,
    parallel: bool,
) -> String {
    let mut iter = stages.iter();
    let Some(first) = iter.next() else {
        return text.to_string();
    };

    let mut out = apply_stage(text, first, segmenter, parallel);
    for stage in iter {
        out = apply_stage(&out, stage, segmenter, parallel);
    }
    out
}
