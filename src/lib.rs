//! # opencc-wordseg
//!
//! Chinese variant conversion (Simplified, Traditional, Taiwan, Hong Kong and
//! Japanese Shinjitai/Kyūjitai) driven by word segmentation.
//!
//! Text is cut into words by a pluggable [`Segmenter`] (jieba by default); each
//! word is looked up whole in a phrase dictionary and, failing that, converted
//! character by character. Compound conversions such as Simplified → Taiwan
//! chain several such stages.
//!
//! Dictionaries are read lazily from a [`DictionarySource`](dictionary_lib::DictionarySource)
//! the first time a conversion needs them and are cached for the lifetime of
//! the [`DictionaryStore`].
//!
//! ```no_run
//! use opencc_wordseg::OpenCC;
//!
//! let opencc = OpenCC::new();
//! opencc.initialize().expect("dictionaries");
//! let tw = opencc.s2tw("圣经研究的观点林林总总").unwrap();
//! assert_eq!(tw, "聖經研究的觀點林林總總");
//! ```

use std::fmt;
use std::sync::Arc;

use crate::dictionary_lib::{DictionaryError, DictionaryStore};
use crate::pipeline::{apply_stages, ResolvedStage, Stage};
use crate::segmenter::{JiebaSegmenter, Segmenter};

pub mod config;
pub mod dictionary_lib;
pub mod pipeline;
pub mod segmenter;

pub use crate::config::{OpenccConfig, ParseConfigError};

/// Converter facade: a dictionary store, a segmenter and a parallelism switch.
///
/// `OpenCC` is `Send + Sync`; share one instance behind an [`Arc`] rather than
/// building one per thread.
pub struct OpenCC {
    store: Arc<DictionaryStore>,
    segmenter: Arc<dyn Segmenter>,
    is_parallel: bool,
}

impl OpenCC {
    /// Dictionaries from [`DictionaryStore::from_env`], jieba segmentation,
    /// parallel conversion of long inputs. No dictionary is read yet.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> OpenCCBuilder {
        OpenCCBuilder::default()
    }

    /// Loads every dictionary now instead of on first use.
    pub fn initialize(&self) -> Result<(), DictionaryError> {
        self.store.initialize()
    }

    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }

    pub fn set_segmenter(&mut self, segmenter: Arc<dyn Segmenter>) {
        self.segmenter = segmenter;
    }

    /// Replaces the segmenter with a freshly built [`JiebaSegmenter`].
    /// Loaded dictionaries are kept.
    pub fn reset_segmenter(&mut self) {
        self.segmenter = Arc::new(JiebaSegmenter::new());
    }

    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.is_parallel = is_parallel;
    }

    pub fn get_parallel(&self) -> bool {
        self.is_parallel
    }

    /// Tokens the active segmenter produces for `input`.
    pub fn segment<'a>(&self, input: &'a str) -> Vec<&'a str> {
        self.segmenter.segment(input)
    }

    /// Runs an arbitrary stage list; the catalog conversions go through here.
    pub fn convert_with_stages(
        &self,
        input: &str,
        stages: &[Stage],
    ) -> Result<String, DictionaryError> {
        let resolved = ResolvedStage::resolve_all(stages, &self.store)?;
        Ok(apply_stages(
            input,
            &resolved,
            self.segmenter.as_ref(),
            self.is_parallel,
        ))
    }

    pub fn convert(&self, input: &str, config: OpenccConfig) -> Result<String, DictionaryError> {
        self.convert_with_stages(input, config.stages())
    }

    /// Like [`convert`](Self::convert) with a config name such as `"s2tw"`.
    pub fn convert_by_name(&self, input: &str, config: &str) -> Result<String, DictionaryError> {
        let config: OpenccConfig = config
            .parse()
            .map_err(|err: ParseConfigError| DictionaryError::UnknownConversion(err.0))?;
        self.convert(input, config)
    }

    pub fn s2t(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::S2t)
    }

    pub fn t2s(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::T2s)
    }

    pub fn s2tw(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::S2tw)
    }

    pub fn tw2s(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::Tw2s)
    }

    pub fn s2hk(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::S2hk)
    }

    pub fn hk2s(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::Hk2s)
    }

    pub fn t2tw(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::T2tw)
    }

    pub fn tw2t(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::Tw2t)
    }

    pub fn t2hk(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::T2hk)
    }

    pub fn hk2t(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::Hk2t)
    }

    pub fn t2jp(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::T2jp)
    }

    pub fn jp2t(&self, input: &str) -> Result<String, DictionaryError> {
        self.convert(input, OpenccConfig::Jp2t)
    }
}

impl Default for OpenCC {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpenCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenCC")
            .field("store", &self.store)
            .field("is_parallel", &self.is_parallel)
            .finish_non_exhaustive()
    }
}

/// Builder for [`OpenCC`]. Unset parts fall back to the defaults of
/// [`OpenCC::new`].
#[derive(Default)]
pub struct OpenCCBuilder {
    store: Option<Arc<DictionaryStore>>,
    segmenter: Option<Arc<dyn Segmenter>>,
    is_parallel: Option<bool>,
}

impl OpenCCBuilder {
    /// Uses (and possibly shares) an existing store.
    pub fn store(mut self, store: Arc<DictionaryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn segmenter(mut self, segmenter: impl Segmenter + 'static) -> Self {
        self.segmenter = Some(Arc::new(segmenter));
        self
    }

    pub fn shared_segmenter(mut self, segmenter: Arc<dyn Segmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    pub fn parallel(mut self, is_parallel: bool) -> Self {
        self.is_parallel = Some(is_parallel);
        self
    }

    pub fn build(self) -> OpenCC {
        OpenCC {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(DictionaryStore::from_env())),
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Arc::new(JiebaSegmenter::new())),
            is_parallel: self.is_parallel.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary_lib::MemorySource;
    use crate::segmenter::CharSegmenter;

    fn opencc() -> OpenCC {
        let source = MemorySource::new()
            .with_fragment("STPhrases", "")
            .with_fragment("STCharacters", "龙\t龍\n马\t馬\n");
        OpenCC::builder()
            .store(Arc::new(DictionaryStore::new(source)))
            .segmenter(CharSegmenter)
            .build()
    }

    #[test]
    fn is_parallel_test() {
        let mut opencc = opencc();
        assert!(opencc.get_parallel());
        opencc.set_parallel(false);
        assert!(!opencc.get_parallel());
    }

    #[test]
    fn convert_by_name_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert_by_name("龙马精神", "S2T").unwrap(), "龍馬精神");
        assert_eq!(
            opencc.convert_by_name("龙马", "s2x").unwrap_err(),
            DictionaryError::UnknownConversion("s2x".to_string())
        );
    }

    #[test]
    fn missing_dictionary_surfaces_on_first_use() {
        let opencc = opencc();
        // TSCharacters/TSPhrases are not in the source.
        assert!(matches!(
            opencc.t2s("龍馬"),
            Err(DictionaryError::MissingFragment { .. })
        ));
        // Dictionaries already loaded keep working.
        assert_eq!(opencc.s2t("龙马").unwrap(), "龍馬");
    }

    #[test]
    fn segment_uses_active_segmenter() {
        let mut opencc = opencc();
        assert_eq!(opencc.segment("龙马"), vec!["龙", "马"]);

        fn whole(text: &str) -> Vec<&str> {
            vec![text]
        }
        opencc.set_segmenter(Arc::new(whole));
        assert_eq!(opencc.segment("龙马"), vec!["龙马"]);
    }

    #[test]
    fn opencc_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OpenCC>();
        assert_send_sync::<DictionaryStore>();
    }
}
