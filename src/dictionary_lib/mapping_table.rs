//! Immutable substitution table used by the conversion pipeline.
//!
//! A [`MappingTable`] maps a source string (a single character or a whole
//! phrase) to its replacement. Tables are built once by the
//! [`DictionaryStore`](crate::dictionary_lib::DictionaryStore) and then shared
//! read-only behind an [`Arc`](std::sync::Arc).
//!
//! ## Example
//! ```
//! use opencc_wordseg::dictionary_lib::MappingTable;
//!
//! let table = MappingTable::build_from_pairs(
//!     "demo",
//!     vec![
//!         ("头发".to_string(), "頭髮".to_string()),
//!         ("发".to_string(), "發".to_string()),
//!     ],
//! );
//!
//! assert_eq!(table.get("头发"), Some("頭髮"));
//! assert_eq!(table.max_len, 2);
//! assert_eq!(table.len(), 2);
//! ```

use rustc_hash::FxHashMap;

/// A dictionary loaded from one or more fragments, with its maximum key length.
///
/// `MappingTable` is the unit cached by the store and consulted by every
/// conversion stage. The same type serves as a *phrase* table (multi-character
/// keys) and a *character* table (single-character keys); which role it plays
/// is decided by the [`Stage`](crate::pipeline::Stage) slot it is placed in.
///
/// # Duplicates
/// Insertion is **last-wins**: a later pair with an existing key replaces the
/// earlier value. This matches the order fragments and lines are read in.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    /// Name the table was requested under (e.g. `"TWPhrasesRev"`).
    pub name: String,

    /// Source string → replacement string.
    pub map: FxHashMap<Box<str>, Box<str>>,

    /// Longest key length in characters (`0` for an empty table).
    pub max_len: usize,
}

impl MappingTable {
    /// Creates an empty table carrying `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: FxHashMap::default(),
            max_len: 0,
        }
    }

    /// Builds a table from `(key, value)` pairs, last-wins on duplicate keys.
    pub fn build_from_pairs<I>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let it = pairs.into_iter();
        let (lower, _) = it.size_hint();

        let mut table = Self::new(name);
        if lower > 0 {
            table.map.reserve(lower);
        }
        for (k, v) in it {
            table.insert(&k, &v);
        }
        table
    }

    /// Inserts or replaces a mapping, keeping `max_len` current.
    ///
    /// Only used while a table is being built; once published through the
    /// store, a table is never mutated again.
    pub(crate) fn insert(&mut self, key: &str, value: &str) {
        let len = key.chars().count();
        if len > self.max_len {
            self.max_len = len;
        }
        self.map.insert(Box::from(key), Box::from(value));
    }

    /// Looks up a replacement for `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_ref())
    }

    /// Looks up a replacement for a single character without allocating.
    #[inline]
    pub fn get_char(&self, ch: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.get(ch.encode_utf8(&mut buf))
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterates all `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_from_pairs_is_last_wins() {
        let table = MappingTable::build_from_pairs(
            "dup",
            vec![
                ("干".to_string(), "幹".to_string()),
                ("干".to_string(), "乾".to_string()),
            ],
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("干"), Some("乾"));
    }

    #[test]
    fn max_len_counts_chars_not_bytes() {
        let table = MappingTable::build_from_pairs(
            "len",
            vec![
                ("林林总总".to_string(), "林林總總".to_string()),
                ("𬴂".to_string(), "騑".to_string()),
            ],
        );
        assert_eq!(table.max_len, 4);
        assert_eq!(table.get_char('𬴂'), Some("騑"));
    }

    #[test]
    fn empty_table() {
        let table = MappingTable::new("empty");
        assert!(table.is_empty());
        assert_eq!(table.max_len, 0);
        assert_eq!(table.get("你"), None);
        assert_eq!(table.get_char('你'), None);
    }
}
