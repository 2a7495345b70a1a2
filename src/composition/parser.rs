//! Parsing the flat decomposition database into a raw adjacency map.

use log::{debug, info};

use super::{CompositionEntry, CompositionGraph};

/// Parse one database line of the shape
/// `character:configuration(comp1,comp2,...)`.
///
/// Trailing closing parentheses are stripped first. The line must then split
/// into exactly two parts on `:` and the second part into exactly two parts
/// on `(`; anything else is rejected with `None`. Malformed lines are
/// skipped by the caller, never fatal. The component list is the comma-split
/// remainder with duplicates and empty items dropped.
pub fn parse_line(line: &str) -> Option<CompositionEntry> {
    let line = line.trim_end().trim_end_matches(')');

    let (character, rest) = line.split_once(':')?;
    if rest.contains(':') {
        return None;
    }
    let (configuration, component_list) = rest.split_once('(')?;
    if component_list.contains('(') {
        return None;
    }

    let mut components: Vec<String> = Vec::new();
    for part in component_list.split(',') {
        if part.is_empty() || components.iter().any(|c| c == part) {
            continue;
        }
        components.push(part.to_string());
    }

    Some(CompositionEntry::new(
        character.to_string(),
        configuration.to_string(),
        components,
    ))
}

/// Build the raw adjacency map from database lines.
///
/// Rejected lines are counted and skipped; a duplicate character key keeps
/// its original position but takes the last entry's value.
pub fn build<'a>(lines: impl IntoIterator<Item = &'a str>) -> CompositionGraph {
    let mut graph = CompositionGraph::default();

    for line in lines {
        match parse_line(line) {
            Some(entry) => {
                let key = entry.character.clone();
                if graph.entries.insert(key.clone(), entry).is_none() {
                    graph.order.push(key);
                }
            }
            None => {
                if !line.trim().is_empty() {
                    debug!("Skipping malformed composition line: {}", line);
                }
                graph.skipped += 1;
            }
        }
    }

    info!(
        "Composition database built: {} entries, {} lines skipped",
        graph.entries.len(),
        graph.skipped
    );
    graph
}
