//! Named dictionaries and the memoizing store that loads them.
//!
//! This module defines:
//!
//! - [`DictionaryId`]: the stable names of every dictionary the conversion
//!   catalog can reference, and how each is assembled from source fragments.
//! - [`DictionaryStore`]: loads tables on first use from a
//!   [`DictionarySource`], caches them, and hands out shared [`Arc`]s.
//! - [`DictionaryError`]: the fatal error taxonomy for dictionary loading.
//!
//! Users generally interact with this indirectly via the `OpenCC` facade, but
//! the store can be shared between several converters or queried directly.

use std::env;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, trace, warn};
use once_cell::sync::OnceCell;
use rustc_hash::FxHashMap;

use crate::dictionary_lib::{
    BundleSource, DictionaryBundle, DictionarySource, DirectorySource, MappingTable,
};

/// Environment variable naming the dictionary directory or bundle file.
pub const DICTS_ENV: &str = "OPENCC_WORDSEG_DICTS";

/// Directory used when [`DICTS_ENV`] is not set.
pub const DEFAULT_DICTS_DIR: &str = "dicts";

/// One source fragment and the direction its lines are read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub name: &'static str,
    pub reversed: bool,
}

impl Fragment {
    pub const fn forward(name: &'static str) -> Self {
        Self {
            name,
            reversed: false,
        }
    }

    pub const fn reversed(name: &'static str) -> Self {
        Self {
            name,
            reversed: true,
        }
    }
}

const ST_CHARACTERS: &[Fragment] = &[Fragment::forward("STCharacters")];
const ST_PHRASES: &[Fragment] = &[Fragment::forward("STPhrases")];
const TS_CHARACTERS: &[Fragment] = &[Fragment::forward("TSCharacters")];
const TS_PHRASES: &[Fragment] = &[Fragment::forward("TSPhrases")];
const TW_VARIANTS: &[Fragment] = &[Fragment::forward("TWVariants")];
const TW_VARIANTS_REV: &[Fragment] = &[Fragment::reversed("TWVariants")];
const TW_VARIANTS_REV_PHRASES: &[Fragment] = &[Fragment::forward("TWVariantsRevPhrases")];
const TW_PHRASES: &[Fragment] = &[
    Fragment::forward("TWPhrasesIT"),
    Fragment::forward("TWPhrasesName"),
    Fragment::forward("TWPhrasesOther"),
];
const TW_PHRASES_REV: &[Fragment] = &[
    Fragment::reversed("TWPhrasesIT"),
    Fragment::reversed("TWPhrasesName"),
    Fragment::reversed("TWPhrasesOther"),
];
const HK_VARIANTS: &[Fragment] = &[Fragment::forward("HKVariants")];
const HK_VARIANTS_REV: &[Fragment] = &[Fragment::reversed("HKVariants")];
const HK_VARIANTS_REV_PHRASES: &[Fragment] = &[Fragment::forward("HKVariantsRevPhrases")];
const JP_VARIANTS: &[Fragment] = &[Fragment::forward("JPVariants")];
const JP_SHINJITAI_PHRASES: &[Fragment] = &[Fragment::forward("JPShinjitaiPhrases")];
// Generic new -> old reversal first, Shinjitai exceptions layered on top.
const JP_KYUJITAI_CHARACTERS: &[Fragment] = &[
    Fragment::reversed("JPVariants"),
    Fragment::forward("JPShinjitaiCharacters"),
];

/// Identifies one logical dictionary.
///
/// Each id resolves to an ordered list of [`Fragment`]s. Reversed fragments are
/// read by inverting their lines, so `TwVariantsRev` and `TwVariants` read the
/// very same `TWVariants.txt`. A dictionary may mix directions:
/// `JpKyujitaiCharacters` is the inversion of `JPVariants.txt` overridden by the
/// forward entries of `JPShinjitaiCharacters.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DictionaryId {
    StCharacters,
    StPhrases,
    TsCharacters,
    TsPhrases,
    TwVariants,
    TwPhrases,
    TwVariantsRev,
    TwVariantsRevPhrases,
    TwPhrasesRev,
    HkVariants,
    HkVariantsRev,
    HkVariantsRevPhrases,
    JpVariants,
    JpShinjitaiPhrases,
    JpKyujitaiCharacters,
}

impl DictionaryId {
    pub const ALL: [DictionaryId; 15] = [
        DictionaryId::StCharacters,
        DictionaryId::StPhrases,
        DictionaryId::TsCharacters,
        DictionaryId::TsPhrases,
        DictionaryId::TwVariants,
        DictionaryId::TwPhrases,
        DictionaryId::TwVariantsRev,
        DictionaryId::TwVariantsRevPhrases,
        DictionaryId::TwPhrasesRev,
        DictionaryId::HkVariants,
        DictionaryId::HkVariantsRev,
        DictionaryId::HkVariantsRevPhrases,
        DictionaryId::JpVariants,
        DictionaryId::JpShinjitaiPhrases,
        DictionaryId::JpKyujitaiCharacters,
    ];

    /// The stable dictionary name, e.g. `"TWPhrasesRev"`.
    pub fn name(self) -> &'static str {
        match self {
            DictionaryId::StCharacters => "STCharacters",
            DictionaryId::StPhrases => "STPhrases",
            DictionaryId::TsCharacters => "TSCharacters",
            DictionaryId::TsPhrases => "TSPhrases",
            DictionaryId::TwVariants => "TWVariants",
            DictionaryId::TwPhrases => "TWPhrases",
            DictionaryId::TwVariantsRev => "TWVariantsRev",
            DictionaryId::TwVariantsRevPhrases => "TWVariantsRevPhrases",
            DictionaryId::TwPhrasesRev => "TWPhrasesRev",
            DictionaryId::HkVariants => "HKVariants",
            DictionaryId::HkVariantsRev => "HKVariantsRev",
            DictionaryId::HkVariantsRevPhrases => "HKVariantsRevPhrases",
            DictionaryId::JpVariants => "JPVariants",
            DictionaryId::JpShinjitaiPhrases => "JPShinjitaiPhrases",
            DictionaryId::JpKyujitaiCharacters => "JPKyujitaiCharacters",
        }
    }

    /// Source fragments merged (in this order, later entries winning) to build
    /// the dictionary.
    pub fn fragments(self) -> &'static [Fragment] {
        match self {
            DictionaryId::StCharacters => ST_CHARACTERS,
            DictionaryId::StPhrases => ST_PHRASES,
            DictionaryId::TsCharacters => TS_CHARACTERS,
            DictionaryId::TsPhrases => TS_PHRASES,
            DictionaryId::TwVariants => TW_VARIANTS,
            DictionaryId::TwPhrases => TW_PHRASES,
            DictionaryId::TwVariantsRev => TW_VARIANTS_REV,
            DictionaryId::TwVariantsRevPhrases => TW_VARIANTS_REV_PHRASES,
            DictionaryId::TwPhrasesRev => TW_PHRASES_REV,
            DictionaryId::HkVariants => HK_VARIANTS,
            DictionaryId::HkVariantsRev => HK_VARIANTS_REV,
            DictionaryId::HkVariantsRevPhrases => HK_VARIANTS_REV_PHRASES,
            DictionaryId::JpVariants => JP_VARIANTS,
            DictionaryId::JpShinjitaiPhrases => JP_SHINJITAI_PHRASES,
            DictionaryId::JpKyujitaiCharacters => JP_KYUJITAI_CHARACTERS,
        }
    }

    fn key(self) -> TableKey {
        TableKey::new(self.fragments().iter().map(|f| (f.name, f.reversed)))
    }
}

impl fmt::Display for DictionaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DictionaryId {
    type Err = DictionaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DictionaryId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| DictionaryError::UnknownDictionary(s.to_string()))
    }
}

/// Cache key: the ordered fragment list, each with its direction.
///
/// Named ids and ad-hoc fragment requests that describe the same list share one
/// cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableKey {
    fragments: Vec<(String, bool)>,
}

impl TableKey {
    fn new<'a>(fragments: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        Self {
            fragments: fragments
                .into_iter()
                .map(|(name, reversed)| (name.to_string(), reversed))
                .collect(),
        }
    }

    fn display_name(&self) -> String {
        let named = DictionaryId::ALL.into_iter().find(|id| {
            let fragments = id.fragments();
            fragments.len() == self.fragments.len()
                && fragments
                    .iter()
                    .zip(&self.fragments)
                    .all(|(f, (name, reversed))| f.name == name.as_str() && f.reversed == *reversed)
        });
        match named {
            Some(id) => id.name().to_string(),
            None => self
                .fragments
                .iter()
                .map(|(name, reversed)| {
                    if *reversed {
                        format!("{}Rev", name)
                    } else {
                        name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join("+"),
        }
    }
}

type LoadResult = Result<Arc<MappingTable>, DictionaryError>;

/// Memoizing, thread-safe loader of [`MappingTable`]s.
///
/// Every table is built at most once per store: concurrent first requests for
/// the same dictionary block on a single load and then share its result.
/// Failed loads are memoized as well, so a broken dictionary reports the same
/// error on every request without touching the source again. Other
/// dictionaries remain loadable.
///
/// # Example
/// ```
/// use opencc_wordseg::dictionary_lib::{DictionaryId, DictionaryStore, MemorySource};
/// use std::sync::Arc;
///
/// let store = DictionaryStore::new(MemorySource::new().with_fragment("TWVariants", "僞\t偽\n"));
///
/// let forward = store.get(DictionaryId::TwVariants).unwrap();
/// let reversed = store.get(DictionaryId::TwVariantsRev).unwrap();
/// assert_eq!(forward.get("僞"), Some("偽"));
/// assert_eq!(reversed.get("偽"), Some("僞"));
///
/// // Memoized: the same instance comes back.
/// assert!(Arc::ptr_eq(&forward, &store.get(DictionaryId::TwVariants).unwrap()));
/// assert_eq!(store.load_count(), 2);
/// ```
pub struct DictionaryStore {
    source: Box<dyn DictionarySource>,
    tables: Mutex<FxHashMap<TableKey, Arc<OnceCell<LoadResult>>>>,
    loads: AtomicUsize,
}

impl DictionaryStore {
    pub fn new(source: impl DictionarySource + 'static) -> Self {
        Self::from_boxed(Box::new(source))
    }

    pub fn from_boxed(source: Box<dyn DictionarySource>) -> Self {
        Self {
            source,
            tables: Mutex::new(FxHashMap::default()),
            loads: AtomicUsize::new(0),
        }
    }

    /// A store over `path`: a bundle file if `path` is a file, otherwise a
    /// dictionary directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_file() {
            Self::new(BundleSource::from_path(path))
        } else {
            Self::new(DirectorySource::new(path))
        }
    }

    /// A store over the location named by [`DICTS_ENV`], falling back to
    /// [`DEFAULT_DICTS_DIR`]. Nothing is read until the first request.
    pub fn from_env() -> Self {
        match env::var_os(DICTS_ENV) {
            Some(path) => Self::from_path(path),
            None => Self::new(DirectorySource::new(DEFAULT_DICTS_DIR)),
        }
    }

    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// Returns the table for `id`, loading it on first use.
    pub fn get(&self, id: DictionaryId) -> Result<Arc<MappingTable>, DictionaryError> {
        self.get_or_load(id.key())
    }

    /// Returns the table named `name` (e.g. `"HKVariantsRev"`).
    pub fn get_by_name(&self, name: &str) -> Result<Arc<MappingTable>, DictionaryError> {
        self.get(name.parse()?)
    }

    /// Returns the forward table merged from `fragments`, in order.
    pub fn get_fragments(&self, fragments: &[&str]) -> Result<Arc<MappingTable>, DictionaryError> {
        self.get_or_load(TableKey::new(fragments.iter().map(|f| (*f, false))))
    }

    /// Returns the reversed table built from `fragments`, in order.
    pub fn get_reversed(&self, fragments: &[&str]) -> Result<Arc<MappingTable>, DictionaryError> {
        self.get_or_load(TableKey::new(fragments.iter().map(|f| (*f, true))))
    }

    /// Loads every [`DictionaryId`], stopping at the first failure.
    pub fn initialize(&self) -> Result<(), DictionaryError> {
        for id in DictionaryId::ALL {
            self.get(id)?;
        }
        info!(
            "initialized {} dictionaries from {}",
            DictionaryId::ALL.len(),
            self.source.describe()
        );
        Ok(())
    }

    /// Whether `id` has been loaded successfully.
    pub fn is_loaded(&self, id: DictionaryId) -> bool {
        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .get(&id.key())
            .and_then(|cell| cell.get())
            .map_or(false, |result| result.is_ok())
    }

    /// Number of table constructions performed so far (successful or not).
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }

    fn get_or_load(&self, key: TableKey) -> LoadResult {
        let cell = {
            let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(tables.entry(key.clone()).or_default())
        };
        cell.get_or_init(|| self.load(&key)).clone()
    }

    fn load(&self, key: &TableKey) -> LoadResult {
        self.loads.fetch_add(1, Ordering::AcqRel);
        let name = key.display_name();

        let result = self
            .source
            .open()
            .and_then(|bundle| build_table(&name, key, bundle.as_ref()));

        match result {
            Ok(table) => {
                debug!(
                    "loaded dictionary {} ({} entries, max_len {}) from {}",
                    name,
                    table.len(),
                    table.max_len,
                    self.source.describe()
                );
                Ok(Arc::new(table))
            }
            Err(err) => {
                warn!("failed to load dictionary {}: {}", name, err);
                Err(err)
            }
        }
    }
}

impl fmt::Debug for DictionaryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryStore")
            .field("source", &self.source.describe())
            .field("loads", &self.load_count())
            .finish()
    }
}

fn build_table(
    name: &str,
    key: &TableKey,
    bundle: &dyn DictionaryBundle,
) -> Result<MappingTable, DictionaryError> {
    let mut table = MappingTable::new(name);
    for (fragment, reversed) in &key.fragments {
        let entry = format!("{}.txt", fragment);
        let content =
            bundle
                .read_entry(&entry)?
                .ok_or_else(|| DictionaryError::MissingFragment {
                    dictionary: name.to_string(),
                    fragment: fragment.clone(),
                })?;
        let lines = parse_fragment(fragment, &content, *reversed, &mut table)?;
        trace!("{}: parsed {} lines from {}", name, lines, entry);
    }
    Ok(table)
}

/// Parses one fragment's lines into `table`, returning the number of entry lines.
///
/// Each line is `KEY<ws>TARGET[<ws>TARGET2 ...]`. Forward tables take
/// `KEY -> TARGET`; reversed tables take `TARGETn -> KEY` for every target.
/// Blank lines are skipped; a line with a key and no target is rejected.
pub(crate) fn parse_fragment(
    fragment: &str,
    content: &str,
    reversed: bool,
    table: &mut MappingTable,
) -> Result<usize, DictionaryError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut count = 0;

    for (index, line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(key) = fields.next() else {
            continue;
        };
        let Some(primary) = fields.next() else {
            return Err(DictionaryError::MalformedEntry {
                fragment: fragment.to_string(),
                line: index + 1,
                content: line.trim().to_string(),
            });
        };

        if reversed {
            table.insert(primary, key);
            for alternative in fields {
                table.insert(alternative, key);
            }
        } else {
            table.insert(key, primary);
        }
        count += 1;
    }

    Ok(count)
}

/// Errors raised while locating, reading or parsing dictionaries.
///
/// All variants are fatal for the dictionary being loaded; the store never
/// substitutes an empty table. Conversion itself has no error case.
///
/// # Variants
/// - `MissingDataSource`: the dictionary directory or bundle does not exist.
/// - `CorruptDataSource`: the bundle exists but cannot be decoded.
/// - `MissingFragment`: the source lacks a `<fragment>.txt` entry.
/// - `MalformedEntry`: a line has fewer than two whitespace-separated fields.
/// - `Io`: any other I/O failure while reading an entry.
/// - `UnknownDictionary` / `UnknownConversion`: a name did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    MissingDataSource {
        source: String,
    },
    CorruptDataSource {
        source: String,
        reason: String,
    },
    MissingFragment {
        dictionary: String,
        fragment: String,
    },
    MalformedEntry {
        fragment: String,
        line: usize,
        content: String,
    },
    Io(String),
    UnknownDictionary(String),
    UnknownConversion(String),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionaryError::MissingDataSource { source } => {
                write!(f, "Missing dictionary data source: {}", source)
            }
            DictionaryError::CorruptDataSource { source, reason } => {
                write!(f, "Corrupt dictionary data source {}: {}", source, reason)
            }
            DictionaryError::MissingFragment {
                dictionary,
                fragment,
            } => write!(
                f,
                "Missing dictionary {}.txt (required by {})",
                fragment, dictionary
            ),
            DictionaryError::MalformedEntry {
                fragment,
                line,
                content,
            } => write!(
                f,
                "Malformed entry in {}.txt at line {}: {:?}",
                fragment, line, content
            ),
            DictionaryError::Io(msg) => write!(f, "I/O Error: {}", msg),
            DictionaryError::UnknownDictionary(name) => {
                write!(f, "Unknown dictionary: {}", name)
            }
            DictionaryError::UnknownConversion(name) => {
                write!(f, "Unknown conversion: {}", name)
            }
        }
    }
}

impl Error for DictionaryError {}

impl From<io::Error> for DictionaryError {
    fn from(err: io::Error) -> Self {
        DictionaryError::Io(err.to_string())
    }
}

impl From<serde_cbor::Error> for DictionaryError {
    fn from(err: serde_cbor::Error) -> Self {
        DictionaryError::CorruptDataSource {
            source: String::from("CBOR payload"),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary_lib::MemorySource;

    fn parse(content: &str, reversed: bool) -> Result<MappingTable, DictionaryError> {
        let mut table = MappingTable::new("test");
        parse_fragment("Test", content, reversed, &mut table)?;
        Ok(table)
    }

    #[test]
    fn forward_uses_first_target_only() {
        let table = parse("发\t發 髮\n干 幹 乾 干\n", false).unwrap();
        assert_eq!(table.get("发"), Some("發"));
        assert_eq!(table.get("干"), Some("幹"));
        assert_eq!(table.get("髮"), None);
    }

    #[test]
    fn reversed_maps_every_target_back() {
        let table = parse("发\t發 髮\n", true).unwrap();
        assert_eq!(table.get("發"), Some("发"));
        assert_eq!(table.get("髮"), Some("发"));
        assert_eq!(table.get("发"), None);
    }

    #[test]
    fn reversed_is_last_wins() {
        let table = parse("甲\tX\n乙\tX\n", true).unwrap();
        assert_eq!(table.get("X"), Some("乙"));
    }

    #[test]
    fn blank_lines_and_bom_are_skipped() {
        let table = parse("\u{feff}龙\t龍\n\n   \n马\t馬\r\n", false).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("马"), Some("馬"));
    }

    #[test]
    fn single_field_line_is_malformed() {
        let err = parse("龙\t龍\n孤\n", false).unwrap_err();
        assert_eq!(
            err,
            DictionaryError::MalformedEntry {
                fragment: "Test".to_string(),
                line: 2,
                content: "孤".to_string(),
            }
        );
    }

    #[test]
    fn id_names_round_trip_through_from_str() {
        for id in DictionaryId::ALL {
            assert_eq!(id.name().parse::<DictionaryId>().unwrap(), id);
        }
        assert!(matches!(
            "NoSuchDict".parse::<DictionaryId>(),
            Err(DictionaryError::UnknownDictionary(_))
        ));
    }

    #[test]
    fn named_and_ad_hoc_requests_share_a_slot() {
        let source = MemorySource::new()
            .with_fragment("TWPhrasesIT", "鼠标\t滑鼠\n")
            .with_fragment("TWPhrasesName", "意大利\t義大利\n")
            .with_fragment("TWPhrasesOther", "");
        let store = DictionaryStore::new(source);

        let named = store.get(DictionaryId::TwPhrases).unwrap();
        let ad_hoc = store
            .get_fragments(&["TWPhrasesIT", "TWPhrasesName", "TWPhrasesOther"])
            .unwrap();
        assert!(Arc::ptr_eq(&named, &ad_hoc));
        assert_eq!(named.name, "TWPhrases");
        assert_eq!(store.load_count(), 1);

        let rev = store
            .get_reversed(&["TWPhrasesIT", "TWPhrasesName", "TWPhrasesOther"])
            .unwrap();
        assert_eq!(rev.name, "TWPhrasesRev");
        assert_eq!(rev.get("義大利"), Some("意大利"));
    }

    #[test]
    fn failures_are_memoized_per_dictionary() {
        let store = DictionaryStore::new(MemorySource::new().with_fragment("STCharacters", "龙\t龍\n"));

        let first = store.get(DictionaryId::StPhrases).unwrap_err();
        let second = store.get(DictionaryId::StPhrases).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(store.load_count(), 1);

        assert!(store.get(DictionaryId::StCharacters).is_ok());
        assert!(store.is_loaded(DictionaryId::StCharacters));
        assert!(!store.is_loaded(DictionaryId::StPhrases));
    }

    #[test]
    fn later_fragment_wins_in_both_directions() {
        let source = MemorySource::new()
            .with_fragment("TWPhrasesIT", "鼠標\t滑鼠\n光碟\t光盤\n")
            .with_fragment("TWPhrasesName", "")
            .with_fragment("TWPhrasesOther", "鼠標\t滑鼠標\n碟片\t光盤\n");
        let store = DictionaryStore::new(source);

        let forward = store.get(DictionaryId::TwPhrases).unwrap();
        assert_eq!(forward.get("鼠標"), Some("滑鼠標"));
        assert_eq!(forward.get("光碟"), Some("光盤"));

        let reversed = store.get(DictionaryId::TwPhrasesRev).unwrap();
        assert_eq!(reversed.get("光盤"), Some("碟片"));
        assert_eq!(reversed.get("滑鼠"), Some("鼠標"));
        assert_eq!(reversed.get("滑鼠標"), Some("鼠標"));
    }

    #[test]
    fn mixed_direction_fragments_layer_in_order() {
        let source = MemorySource::new()
            .with_fragment("JPVariants", "藝\t芸\n國\t国\n")
            .with_fragment("JPShinjitaiCharacters", "芸\t芸\n");
        let store = DictionaryStore::new(source);

        let table = store.get(DictionaryId::JpKyujitaiCharacters).unwrap();
        assert_eq!(table.name, "JPKyujitaiCharacters");
        assert_eq!(table.get("国"), Some("國"));
        assert_eq!(table.get("芸"), Some("芸"));
        assert_eq!(table.get("藝"), None);
        assert_eq!(
            DictionaryId::JpKyujitaiCharacters.fragments(),
            &[
                Fragment::reversed("JPVariants"),
                Fragment::forward("JPShinjitaiCharacters"),
            ]
        );
    }

    #[test]
    fn mixed_direction_dictionary_needs_every_fragment() {
        let store = DictionaryStore::new(MemorySource::new().with_fragment("JPVariants", "藝\t芸\n"));
        assert_eq!(
            store.get(DictionaryId::JpKyujitaiCharacters).unwrap_err(),
            DictionaryError::MissingFragment {
                dictionary: "JPKyujitaiCharacters".to_string(),
                fragment: "JPShinjitaiCharacters".to_string(),
            }
        );
    }
}
