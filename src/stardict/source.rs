//! Resolution of dictionary source blobs from disk.
//!
//! Each blob (index, data) has a primary path and a gzip-compressed fallback
//! path. The raw form is tried first; if it cannot be opened, the fallback is
//! decompressed instead. dictzip (`.dict.dz`) files are gzip-framed, so the
//! same decoder covers both fallbacks.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::debug;

use crate::error::{LookupError, Result};

/// The on-disk file pair layout of one StarDict dictionary, derived from a
/// shared path prefix.
#[derive(Debug, Clone)]
pub struct DictPaths {
    pub index: PathBuf,
    pub index_gz: PathBuf,
    pub data: PathBuf,
    pub data_dz: PathBuf,
}

impl DictPaths {
    /// Derive the four candidate paths from a dictionary prefix, e.g.
    /// `dict/cedict-gb/cedict-gb` names `cedict-gb.idx`, `cedict-gb.idx.gz`,
    /// `cedict-gb.dict` and `cedict-gb.dict.dz`.
    pub fn from_prefix(prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref();
        Self {
            index: with_suffix(prefix, ".idx"),
            index_gz: with_suffix(prefix, ".idx.gz"),
            data: with_suffix(prefix, ".dict"),
            data_dz: with_suffix(prefix, ".dict.dz"),
        }
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Read a source blob, trying the raw path first and the gzip fallback second.
///
/// Fails with [`LookupError::DataUnavailable`] naming both attempted paths
/// when neither form can be read.
pub fn read_with_fallback(primary: &Path, fallback: &Path) -> Result<Vec<u8>> {
    match read_raw(primary) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), primary.display());
            Ok(bytes)
        }
        Err(primary_err) => {
            debug!(
                "Primary source {} unreadable ({}), trying fallback {}",
                primary.display(),
                primary_err,
                fallback.display()
            );
            read_gzip(fallback).map_err(|_| LookupError::DataUnavailable {
                primary: primary.to_path_buf(),
                fallback: fallback.to_path_buf(),
            })
        }
    }
}

fn read_raw(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn read_gzip(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    GzDecoder::new(File::open(path)?).read_to_end(&mut bytes)?;
    Ok(bytes)
}
