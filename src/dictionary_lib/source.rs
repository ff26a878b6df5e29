//! Data sources that yield dictionary fragments.
//!
//! A data source is an archive-like container of line-delimited text entries
//! named `<fragment>.txt`. The store opens its source once per dictionary load
//! and reads the entries the dictionary is made of.
//!
//! Three sources ship with the crate:
//!
//! - [`DirectorySource`]: a plain directory of `.txt` files (the `dicts/` layout).
//! - [`BundleSource`]: a Zstd-compressed CBOR map of entry name → text, read from
//!   disk or from bytes embedded with `include_bytes!`.
//! - [`MemorySource`]: entries held in memory, handy for tests and for callers
//!   that assemble dictionaries at runtime.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, trace};
use once_cell::sync::OnceCell;
use zstd::{decode_all, encode_all, Encoder};

use crate::dictionary_lib::DictionaryError;

/// Zstd level used when packing bundles.
const BUNDLE_ZSTD_LEVEL: i32 = 19;

/// An opened data source, valid for the duration of one dictionary load.
pub trait DictionaryBundle {
    /// Returns the text of `entry` (e.g. `"STCharacters.txt"`), or `None` if the
    /// bundle has no such entry.
    fn read_entry(&self, entry: &str) -> Result<Option<String>, DictionaryError>;
}

/// A container of dictionary fragments.
///
/// Implementations must be shareable across threads; the store may open the
/// source from whichever thread first requests a dictionary.
pub trait DictionarySource: Send + Sync {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    /// Opens the container.
    ///
    /// Fails with [`DictionaryError::MissingDataSource`] when the container does
    /// not exist and [`DictionaryError::CorruptDataSource`] when it cannot be decoded.
    fn open(&self) -> Result<Box<dyn DictionaryBundle + '_>, DictionaryError>;
}

/// Dictionary fragments stored as `<fragment>.txt` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

struct DirectoryBundle<'a> {
    root: &'a Path,
}

impl DictionaryBundle for DirectoryBundle<'_> {
    fn read_entry(&self, entry: &str) -> Result<Option<String>, DictionaryError> {
        let path = self.root.join(entry);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DictionaryError::Io(format!(
                "Failed to read file {}: {}",
                path.display(),
                err
            ))),
        }
    }
}

impl DictionarySource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }

    fn open(&self) -> Result<Box<dyn DictionaryBundle + '_>, DictionaryError> {
        if !self.root.is_dir() {
            return Err(DictionaryError::MissingDataSource {
                source: self.describe(),
            });
        }
        Ok(Box::new(DirectoryBundle { root: &self.root }))
    }
}

/// Entry name → entry text, the decoded payload of a bundle.
pub type BundleEntries = BTreeMap<String, String>;

struct EntriesBundle(Arc<BundleEntries>);

impl DictionaryBundle for EntriesBundle {
    fn read_entry(&self, entry: &str) -> Result<Option<String>, DictionaryError> {
        Ok(self.0.get(entry).cloned())
    }
}

#[derive(Debug, Clone)]
enum BundleOrigin {
    Path(PathBuf),
    Bytes(Cow<'static, [u8]>),
}

/// A Zstd-compressed CBOR bundle of dictionary fragments.
///
/// The payload is decoded on the first [`open`](DictionarySource::open) and kept
/// for later loads, so each fragment text is decompressed once per source. A
/// failed decode is kept as well and reported again on every later open.
///
/// # Example
/// ```
/// use opencc_wordseg::dictionary_lib::{BundleSource, DictionaryBundle, DictionarySource};
/// use std::collections::BTreeMap;
///
/// let mut entries = BTreeMap::new();
/// entries.insert("STCharacters.txt".to_string(), "发\t發 髮\n".to_string());
/// let bytes = BundleSource::pack_entries(&entries).unwrap();
///
/// let source = BundleSource::from_bytes(bytes);
/// let bundle = source.open().unwrap();
/// assert!(bundle.read_entry("STCharacters.txt").unwrap().is_some());
/// assert!(bundle.read_entry("TSCharacters.txt").unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct BundleSource {
    origin: BundleOrigin,
    decoded: OnceCell<Result<Arc<BundleEntries>, DictionaryError>>,
}

impl BundleSource {
    /// A bundle file on disk. The file is not touched until the first open.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: BundleOrigin::Path(path.into()),
            decoded: OnceCell::new(),
        }
    }

    /// A bundle already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            origin: BundleOrigin::Bytes(Cow::Owned(bytes)),
            decoded: OnceCell::new(),
        }
    }

    /// A bundle embedded in the binary, e.g. via `include_bytes!`.
    pub fn from_static(bytes: &'static [u8]) -> Self {
        Self {
            origin: BundleOrigin::Bytes(Cow::Borrowed(bytes)),
            decoded: OnceCell::new(),
        }
    }

    fn decode(&self) -> Result<Arc<BundleEntries>, DictionaryError> {
        let compressed: Cow<'_, [u8]> = match &self.origin {
            BundleOrigin::Path(path) => {
                if !path.is_file() {
                    return Err(DictionaryError::MissingDataSource {
                        source: self.describe(),
                    });
                }
                Cow::Owned(fs::read(path).map_err(|err| {
                    DictionaryError::Io(format!(
                        "Failed to read bundle {}: {}",
                        path.display(),
                        err
                    ))
                })?)
            }
            BundleOrigin::Bytes(bytes) => Cow::Borrowed(bytes.as_ref()),
        };

        let corrupt = |reason: String| DictionaryError::CorruptDataSource {
            source: self.describe(),
            reason,
        };

        let decompressed = decode_all(Cursor::new(compressed.as_ref()))
            .map_err(|err| corrupt(format!("Failed to decompress Zstd: {}", err)))?;
        let entries: BundleEntries = serde_cbor::from_slice(&decompressed)
            .map_err(|err| corrupt(format!("Failed to parse CBOR: {}", err)))?;

        debug!("decoded {} with {} entries", self.describe(), entries.len());
        Ok(Arc::new(entries))
    }

    /// Serializes `entries` to CBOR and compresses the result with Zstd.
    pub fn pack_entries(entries: &BundleEntries) -> Result<Vec<u8>, DictionaryError> {
        let cbor = serde_cbor::to_vec(entries)?;
        Ok(encode_all(Cursor::new(cbor), BUNDLE_ZSTD_LEVEL)?)
    }

    /// Packs every `*.txt` file directly under `dir` into bundle bytes.
    pub fn pack_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<u8>, DictionaryError> {
        let entries = read_txt_entries(dir.as_ref())?;
        Self::pack_entries(&entries)
    }

    /// Packs every `*.txt` file directly under `dir` into a bundle file at `path`.
    pub fn write_bundle<P: AsRef<Path>, Q: AsRef<Path>>(
        dir: P,
        path: Q,
    ) -> Result<(), DictionaryError> {
        let entries = read_txt_entries(dir.as_ref())?;
        let file = File::create(path.as_ref())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, BUNDLE_ZSTD_LEVEL)?;
        serde_cbor::to_writer(&mut encoder, &entries)?;
        encoder.finish()?.flush()?;
        debug!(
            "wrote bundle {} ({} entries)",
            path.as_ref().display(),
            entries.len()
        );
        Ok(())
    }
}

impl DictionarySource for BundleSource {
    fn describe(&self) -> String {
        match &self.origin {
            BundleOrigin::Path(path) => format!("bundle {}", path.display()),
            BundleOrigin::Bytes(bytes) => format!("in-memory bundle ({} bytes)", bytes.len()),
        }
    }

    fn open(&self) -> Result<Box<dyn DictionaryBundle + '_>, DictionaryError> {
        let entries = self.decoded.get_or_init(|| self.decode()).clone()?;
        Ok(Box::new(EntriesBundle(entries)))
    }
}

fn read_txt_entries(dir: &Path) -> Result<BundleEntries, DictionaryError> {
    if !dir.is_dir() {
        return Err(DictionaryError::MissingDataSource {
            source: format!("directory {}", dir.display()),
        });
    }

    let mut entries = BundleEntries::new();
    for dir_entry in fs::read_dir(dir)? {
        let path = dir_entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        trace!("packing {}", path.display());
        entries.insert(name.to_string(), fs::read_to_string(&path)?);
    }
    Ok(entries)
}

/// Fragments held in memory.
///
/// ```
/// use opencc_wordseg::dictionary_lib::{DictionaryStore, DictionaryId, MemorySource};
///
/// let source = MemorySource::new()
///     .with_fragment("STCharacters", "龙\t龍\n马\t馬\n")
///     .with_fragment("STPhrases", "");
/// let store = DictionaryStore::new(source);
/// let table = store.get(DictionaryId::StCharacters).unwrap();
/// assert_eq!(table.get("龙"), Some("龍"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Arc<BundleEntries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the entry `<fragment>.txt`.
    pub fn with_fragment(mut self, fragment: &str, content: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.entries).insert(format!("{}.txt", fragment), content.into());
        self
    }
}

impl From<BundleEntries> for MemorySource {
    fn from(entries: BundleEntries) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl DictionarySource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} entries)", self.entries.len())
    }

    fn open(&self) -> Result<Box<dyn DictionaryBundle + '_>, DictionaryError> {
        Ok(Box::new(EntriesBundle(Arc::clone(&self.entries))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn directory_source_reports_missing_root() {
        let source = DirectorySource::new("/definitely/not/here/dicts");
        let err = source.open().err().unwrap();
        assert!(matches!(err, DictionaryError::MissingDataSource { .. }));
    }

    #[test]
    fn directory_source_absent_entry_is_none() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("STCharacters.txt"), "发\t發\n").unwrap();
        let source = DirectorySource::new(dir.path());
        let bundle = source.open().unwrap();
        assert_eq!(
            bundle.read_entry("STCharacters.txt").unwrap().as_deref(),
            Some("发\t發\n")
        );
        assert!(bundle.read_entry("STPhrases.txt").unwrap().is_none());
    }

    #[test]
    fn bundle_written_from_directory_can_be_opened() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("HKVariants.txt"), "僞\t偽\n").unwrap();
        fs::write(dir.path().join("README.md"), "ignored").unwrap();

        let out = dir.path().join("dicts.zst");
        BundleSource::write_bundle(dir.path(), &out).unwrap();

        let source = BundleSource::from_path(&out);
        let bundle = source.open().unwrap();
        assert_eq!(
            bundle.read_entry("HKVariants.txt").unwrap().as_deref(),
            Some("僞\t偽\n")
        );
        assert!(bundle.read_entry("README.md").unwrap().is_none());
    }

    #[test]
    fn garbage_bundle_is_corrupt() {
        let source = BundleSource::from_bytes(b"not a zstd frame".to_vec());
        let err = source.open().err().unwrap();
        assert!(matches!(err, DictionaryError::CorruptDataSource { .. }));
        // The failure is remembered.
        let again = source.open().err().unwrap();
        assert_eq!(err, again);
    }

    #[test]
    fn missing_bundle_file() {
        let dir = tempdir().unwrap();
        let source = BundleSource::from_path(dir.path().join("nope.zst"));
        assert!(matches!(
            source.open().err().unwrap(),
            DictionaryError::MissingDataSource { .. }
        ));
    }
}
