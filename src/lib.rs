//! # hanzi-lookup
//!
//! Offline lookup of CJK characters by structural composition, backed by a
//! StarDict-style binary dictionary (index/data pair) and a flat character
//! decomposition database.
//!
//! Two independent subsystems:
//! - [`stardict`] decodes the binary index into a word → translation store,
//!   merging duplicate entries and normalizing pronunciation annotations.
//! - [`composition`] builds a character → components graph, expands it to its
//!   transitive closure, and answers subset-containment queries.

pub mod composition;
pub mod error;
pub mod stardict;

// Re-export the main types for convenience
pub use composition::{CompositionCatalog, CompositionEntry, CompositionGraph};
pub use error::{LookupError, Result};
pub use stardict::{
    registry::{DictSpec, DictionaryRegistry},
    StardictStore,
};
