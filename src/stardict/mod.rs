//! StarDict dictionary decoding and lookup.
//!
//! A dictionary is an index/data file pair: the index is a packed sequence of
//! `<utf8-key><0x00><offset:u32be><length:u32be>` records, and the data file
//! is an opaque blob a translation is sliced out of by offset and length.

pub mod registry;
pub mod scanner;
pub mod source;

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use byteorder::{BigEndian, ByteOrder};
use log::info;
use regex::Regex;

use crate::error::{LookupError, Result};
use self::scanner::RecordScanner;
use self::source::{read_with_fallback, DictPaths};

/// Compiled regex for the romanized-pronunciation token heuristic.
///
/// Matches an ASCII word-character (or `+`) run ending in a digit, e.g.
/// `ni3`, `zhong1`. ASCII classes only, so CJK text never matches.
static PINYIN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pinyin_regex() -> &'static Regex {
    PINYIN_PATTERN
        .get_or_init(|| Regex::new(r"[[:word:]+]*[0-9]").expect("Invalid pinyin regex pattern"))
}

/// An immutable-after-construction word → translation store decoded from one
/// StarDict index/data pair.
///
/// Duplicate keys in the index are merged, not overwritten: their translations
/// are concatenated in first-seen order. After construction the store is only
/// read, never mutated.
#[derive(Debug)]
pub struct StardictStore {
    words: HashMap<String, String>,
}

impl StardictStore {
    /// Decode an index/data blob pair into a store.
    ///
    /// For each index record the 8-byte tail is read as two big-endian u32
    /// fields, `offset` then `length`, locating the raw translation inside
    /// `data`. When `tag_pronunciation` is set, the post-processing pass wraps
    /// the first pronunciation token of each translation in brackets; the
    /// "no-pronunciation" dictionary variants pass `false`.
    ///
    /// # Errors
    /// Returns [`LookupError::MalformedRecord`] when a key is not valid UTF-8
    /// or a translation slice falls outside the data blob. The index format
    /// guarantees fixed-width tails, so the whole parse aborts rather than
    /// recovering a partial store.
    pub fn parse(index: &[u8], data: &[u8], tag_pronunciation: bool) -> Result<Self> {
        info!("Parsing StarDict index ({} bytes)", index.len());

        let mut words: HashMap<String, String> = HashMap::new();
        let mut record_count = 0usize;

        for record in RecordScanner::new(index) {
            record_count += 1;
            let key = std::str::from_utf8(record.key).map_err(|e| {
                LookupError::MalformedRecord {
                    reason: format!("key at record {} is not valid UTF-8: {}", record_count, e),
                }
            })?;
            let offset = BigEndian::read_u32(&record.tail[0..4]) as usize;
            let length = BigEndian::read_u32(&record.tail[4..8]) as usize;

            let end = offset.checked_add(length).filter(|&end| end <= data.len());
            let Some(end) = end else {
                return Err(LookupError::MalformedRecord {
                    reason: format!(
                        "translation slice for '{}' out of bounds: offset {} + length {} > data size {}",
                        key,
                        offset,
                        length,
                        data.len()
                    ),
                });
            };
            let translation = String::from_utf8_lossy(&data[offset..end]).into_owned();

            // Duplicate keys merge in first-seen order, separated by a
            // newline the post-pass normalizes to ", ".
            match words.get_mut(key) {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(&translation);
                }
                None => {
                    words.insert(key.to_string(), translation);
                }
            }
        }

        info!(
            "Decoded {} records into {} distinct words",
            record_count,
            words.len()
        );

        normalize_translations(&mut words, tag_pronunciation);
        Ok(Self { words })
    }

    /// Open a dictionary from its on-disk path prefix.
    ///
    /// Resolves `<prefix>.idx` (fallback `<prefix>.idx.gz`) and
    /// `<prefix>.dict` (fallback `<prefix>.dict.dz`); each source tries the
    /// raw form first and the gzip form second.
    pub fn open(prefix: impl AsRef<Path>, tag_pronunciation: bool) -> Result<Self> {
        let paths = DictPaths::from_prefix(prefix.as_ref());
        info!("Loading StarDict dictionary '{}'", prefix.as_ref().display());
        let index = read_with_fallback(&paths.index, &paths.index_gz)?;
        let data = read_with_fallback(&paths.data, &paths.data_dz)?;
        Self::parse(&index, &data, tag_pronunciation)
    }

    /// Exact-key lookup. A miss is `None`, never an error.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    /// Number of distinct words in the store.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over every (word, translation) pair, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = (&str, &str)> {
        self.words.iter().map(|(w, t)| (w.as_str(), t.as_str()))
    }
}

/// Post-processing pass over every stored translation.
///
/// Collapses the newline separators left by duplicate-key merging into ", ",
/// then (unless tagging is disabled) wraps the first pronunciation token in
/// brackets followed by a space: `ni3` becomes `[ni3] `. Only the first
/// occurrence is annotated; the rest of the translation is left untouched.
fn normalize_translations(words: &mut HashMap<String, String>, tag_pronunciation: bool) {
    let re = pinyin_regex();
    for translation in words.values_mut() {
        let mut normalized = translation.replace('\n', ", ");
        if tag_pronunciation {
            normalized = re.replace(&normalized, "[${0}] ").into_owned();
        }
        *translation = normalized;
    }
}
