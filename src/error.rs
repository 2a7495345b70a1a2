//! Custom error types for the hanzi-lookup crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum LookupError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// Neither the primary nor the compressed fallback form of a dictionary
    /// source could be read.
    #[error("cannot open '{}' or compressed fallback '{}'", primary.display(), fallback.display())]
    DataUnavailable { primary: PathBuf, fallback: PathBuf },

    /// An index record is structurally invalid (non-UTF-8 key, or a
    /// translation slice that falls outside the data blob). The index format
    /// guarantees fixed-width tails, so this aborts parsing rather than
    /// producing a partial dictionary.
    #[error("malformed index record: {reason}")]
    MalformedRecord { reason: String },

    /// A dictionary name was requested that has no registered source.
    #[error("unknown dictionary: '{0}'")]
    UnknownDictionary(String),

    /// A translation was requested before any dictionary was registered.
    #[error("no dictionary registered")]
    NoActiveDictionary,
}

/// A convenience `Result` type alias using the crate's `LookupError` type.
pub type Result<T> = std::result::Result<T, LookupError>;
