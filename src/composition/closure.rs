//! Transitive closure expansion of the composition graph.

use log::info;

use super::CompositionGraph;

/// Expand every entry's component list in place until it transitively
/// includes the components of its components.
///
/// Per entry: repeatedly take the first component not yet visited for that
/// entry, mark it visited, and if it is itself a key in the map union its
/// current component list into the entry's, skipping ones already present.
/// The growing component list is the implicit worklist, so newly discovered
/// components are scheduled automatically. Each component is visited at most
/// once per entry over a finite universe, which bounds the loop even for
/// cyclic or self-referential decompositions. Closures are computed
/// independently per entry, with no cross-entry memoization.
///
/// Expanding an already-expanded graph is a no-op (fixpoint).
pub fn expand(graph: &mut CompositionGraph) {
    for key in graph.order.clone() {
        loop {
            let next = graph.entries.get(&key).and_then(|entry| {
                entry
                    .components
                    .iter()
                    .find(|c| !entry.visited.contains(c.as_str()))
                    .cloned()
            });
            let Some(component) = next else {
                break;
            };

            // Snapshot before re-borrowing mutably; the component may resolve
            // to this same entry when the graph is cyclic.
            let sub_components = graph
                .entries
                .get(&component)
                .map(|sub| sub.components.clone());

            if let Some(entry) = graph.entries.get_mut(&key) {
                entry.visited.insert(component);
                if let Some(sub_components) = sub_components {
                    for sub in sub_components {
                        if !entry.components.contains(&sub) {
                            entry.components.push(sub);
                        }
                    }
                }
            }
        }
    }

    info!("Composition closure expanded for {} entries", graph.len());
}
