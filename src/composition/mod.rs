//! Character composition graph: decomposition parsing, transitive closure,
//! and containment queries.
//!
//! The decomposition database is a flat text file, one entry per line, of the
//! shape `character:configuration(comp1,comp2,...)`. Building the graph turns
//! it into `character -> direct components`; closure expansion then grows each
//! component list until it transitively includes components-of-components, so
//! queries match sub-components nested arbitrarily deep.

pub mod closure;
pub mod parser;
pub mod query;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;

use log::info;
use regex::Regex;

use crate::error::Result;

/// One character's decomposition.
///
/// `components` is ordered and duplicate-free; during closure expansion it
/// grows monotonically. The visited set is internal bookkeeping for the
/// expansion and not part of the public result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionEntry {
    /// The decomposed character, a single CJK code point rendered as text.
    pub character: String,
    /// Short tag describing the geometric relationship between the parts,
    /// e.g. "surrounds", "flows across".
    pub configuration: String,
    /// Direct components after parsing; transitively reachable components
    /// after closure expansion.
    pub components: Vec<String>,
    visited: HashSet<String>,
}

impl CompositionEntry {
    pub(crate) fn new(character: String, configuration: String, components: Vec<String>) -> Self {
        Self {
            character,
            configuration,
            components,
            visited: HashSet::new(),
        }
    }
}

/// The full `character -> CompositionEntry` mapping.
///
/// Entries keep their database insertion order so whole-map queries are
/// deterministic. Built once, expanded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositionGraph {
    entries: HashMap<String, CompositionEntry>,
    order: Vec<String>,
    skipped: usize,
}

impl CompositionGraph {
    pub fn get(&self, character: &str) -> Option<&CompositionEntry> {
        self.entries.get(character)
    }

    /// Every character key, in database insertion order.
    pub fn characters(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of database lines rejected as malformed during the build.
    /// Skips are line-scoped; they never abort the build.
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }
}

/// Lazily-built composition database.
///
/// Owns the database path; the graph is parsed and closure-expanded on the
/// first query and cached for the catalog's lifetime. All lazy construction
/// goes through `&mut self`, so a concurrent caller must add its own
/// initialize-once barrier around the catalog.
#[derive(Debug)]
pub struct CompositionCatalog {
    source: PathBuf,
    graph: Option<CompositionGraph>,
}

impl CompositionCatalog {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            graph: None,
        }
    }

    /// Build a catalog directly from database text, bypassing the filesystem.
    pub fn from_text(text: &str) -> Self {
        let mut graph = parser::build(text.lines());
        closure::expand(&mut graph);
        Self {
            source: PathBuf::new(),
            graph: Some(graph),
        }
    }

    fn graph(&mut self) -> Result<&CompositionGraph> {
        if self.graph.is_none() {
            info!("Loading composition database {}", self.source.display());
            let text = fs::read_to_string(&self.source)?;
            let mut graph = parser::build(text.lines());
            closure::expand(&mut graph);
            self.graph = Some(graph);
        }
        Ok(self
            .graph
            .as_ref()
            .expect("composition graph initialized above"))
    }

    /// Filter `candidates` down to the characters whose closed component list
    /// contains every required component and, when a pattern is given, whose
    /// configuration tag matches it. Candidates absent from the database
    /// never match.
    pub fn find(
        &mut self,
        candidates: &[&str],
        required: &[&str],
        config_pattern: Option<&Regex>,
    ) -> Result<Vec<String>> {
        let graph = self.graph()?;
        Ok(query::find(graph, candidates, required, config_pattern))
    }

    /// Same predicate as [`CompositionCatalog::find`], applied to every
    /// character in the database, in insertion order.
    pub fn find_all(
        &mut self,
        required: &[&str],
        config_pattern: Option<&Regex>,
    ) -> Result<Vec<String>> {
        let graph = self.graph()?;
        Ok(query::find_all(graph, required, config_pattern))
    }

    /// The closed decomposition of one character, or `None` if the database
    /// does not decompose it.
    pub fn describe(&mut self, character: &str) -> Result<Option<&CompositionEntry>> {
        Ok(self.graph()?.get(character))
    }
}
