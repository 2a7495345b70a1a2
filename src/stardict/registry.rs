//! Named dictionary cache with lazy construction and an active selection.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;

use log::info;

use super::StardictStore;
use crate::error::{LookupError, Result};

/// Where and how to build one named dictionary.
#[derive(Debug, Clone)]
pub struct DictSpec {
    /// Path prefix the index/data file pair is derived from.
    pub prefix: PathBuf,
    /// Whether translations get the first-pronunciation-token bracket
    /// annotation. Dictionaries whose entries carry no romanized
    /// pronunciation set this to `false`.
    pub tag_pronunciation: bool,
}

impl DictSpec {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            tag_pronunciation: true,
        }
    }

    pub fn without_pronunciation(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            tag_pronunciation: false,
        }
    }
}

/// Cache of named [`StardictStore`] instances.
///
/// Each named dictionary is parsed at most once, on first access, and the
/// parsed store is retained for the registry's lifetime — there is no
/// eviction. [`DictionaryRegistry::switch`] forces a rebuild and replaces the
/// cached instance. The registry is explicit owned state: callers that share
/// it across threads must wrap it in their own initialize-once barrier, since
/// all lazy construction goes through `&mut self`.
#[derive(Debug, Default)]
pub struct DictionaryRegistry {
    specs: HashMap<String, DictSpec>,
    cache: HashMap<String, StardictStore>,
    active: Option<String>,
}

impl DictionaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named dictionary source. The first registered name becomes
    /// the active dictionary.
    pub fn register(&mut self, name: impl Into<String>, spec: DictSpec) {
        let name = name.into();
        if self.active.is_none() {
            self.active = Some(name.clone());
        }
        self.specs.insert(name, spec);
    }

    /// Get the store for a registered name, parsing it on first access.
    pub fn store(&mut self, name: &str) -> Result<&StardictStore> {
        let spec = self
            .specs
            .get(name)
            .ok_or_else(|| LookupError::UnknownDictionary(name.to_string()))?;
        match self.cache.entry(name.to_string()) {
            Entry::Occupied(cached) => Ok(cached.into_mut()),
            Entry::Vacant(slot) => {
                let store = StardictStore::open(&spec.prefix, spec.tag_pronunciation)?;
                Ok(slot.insert(store))
            }
        }
    }

    /// Make `name` the active dictionary, discarding any cached instance and
    /// rebuilding it from its sources.
    pub fn switch(&mut self, name: &str) -> Result<()> {
        if !self.specs.contains_key(name) {
            return Err(LookupError::UnknownDictionary(name.to_string()));
        }
        info!("Switching active dictionary to '{}'", name);
        self.cache.remove(name);
        self.store(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Name of the active dictionary, if any has been registered.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Look a word up in the active dictionary, building it lazily.
    ///
    /// A lookup miss is `Ok(None)`; an error means the active dictionary
    /// could not be built (or none is registered).
    pub fn translate(&mut self, word: &str) -> Result<Option<&str>> {
        let name = self.active.clone().ok_or(LookupError::NoActiveDictionary)?;
        Ok(self.store(&name)?.lookup(word))
    }
}
