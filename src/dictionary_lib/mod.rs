//! Dictionary loading and caching.
//!
//! - [`MappingTable`]: one immutable substitution table.
//! - [`DictionarySource`] and its implementations: where fragment text comes from.
//! - [`DictionaryStore`]: memoized, thread-safe get-or-load of named tables.

pub mod dictionary_store;
pub mod mapping_table;
pub mod source;

pub use dictionary_store::{
    DictionaryError, DictionaryId, DictionaryStore, Fragment, DEFAULT_DICTS_DIR, DICTS_ENV,
};
pub use mapping_table::MappingTable;
pub use source::{
    BundleEntries, BundleSource, DictionaryBundle, DictionarySource, DirectorySource, MemorySource,
};
