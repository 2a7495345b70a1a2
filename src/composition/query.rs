//! Subset-containment queries over the closed composition graph.

use regex::Regex;

use super::{CompositionEntry, CompositionGraph};

/// Whether an entry's closed component list contains every required
/// component, and its configuration tag matches the pattern when one is
/// given.
fn matches(entry: &CompositionEntry, required: &[&str], config_pattern: Option<&Regex>) -> bool {
    let has_components = required
        .iter()
        .all(|r| entry.components.iter().any(|c| c == r));
    let config_matches = config_pattern
        .map_or(true, |pattern| pattern.is_match(&entry.configuration));
    has_components && config_matches
}

/// Filter a candidate list; candidates absent from the graph never match.
pub fn find(
    graph: &CompositionGraph,
    candidates: &[&str],
    required: &[&str],
    config_pattern: Option<&Regex>,
) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| {
            graph
                .get(candidate)
                .is_some_and(|entry| matches(entry, required, config_pattern))
        })
        .map(|candidate| candidate.to_string())
        .collect()
}

/// Apply the same predicate to every character in the graph, in database
/// insertion order.
pub fn find_all(
    graph: &CompositionGraph,
    required: &[&str],
    config_pattern: Option<&Regex>,
) -> Vec<String> {
    graph
        .characters()
        .filter(|character| {
            graph
                .get(character)
                .is_some_and(|entry| matches(entry, required, config_pattern))
        })
        .map(str::to_string)
        .collect()
}
