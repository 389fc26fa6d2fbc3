//! Display projection for search trees.
//!
//! Search node names spell out the whole partial assignment on the path
//! from the root (`{'A': 1, 'B': 2}`), so printing them verbatim repeats the
//! parent's label at every level. [`project`] derives a trimmed copy of the
//! live graph where each child shows only what it adds to its parent.
//!
//! The projection is always recomputed from scratch; nothing patches it
//! incrementally, so it cannot drift from the live graph.

use std::collections::HashMap;

use crate::graph::VizGraph;

/// Characters dropped from labels before comparing parent and child text.
pub const STRUCTURAL_PUNCTUATION: [char; 3] = ['{', '}', '\''];

/// Separator between assignments inside a label.
pub const LABEL_SEPARATOR: &str = ", ";

/// Removes `{`, `}` and `'` from a label.
pub fn strip_punctuation(label: &str) -> String {
    label
        .chars()
        .filter(|c| !STRUCTURAL_PUNCTUATION.contains(c))
        .collect()
}

/// Removes the first occurrence of `"<parent_text>, "` from `child`.
///
/// A child that does not contain its parent's text (search order differs
/// from naming order) is returned unchanged. An empty parent text still
/// removes the first bare `", "`.
pub fn trim_label(child: &str, parent_text: &str) -> String {
    let prefix = format!("{}{}", parent_text, LABEL_SEPARATOR);
    child.replacen(&prefix, "", 1)
}

/// Returns the trimmed copy of `live`.
///
/// Every node name is punctuation-stripped. Each edge target additionally
/// gets `parent_text` set from its source and the parent's text removed from
/// its name. All parent texts are taken from the untouched live names before
/// any name is rewritten, since a node can be a child on one edge and a
/// parent on another.
pub fn project(live: &VizGraph) -> VizGraph {
    let mut projected = live.detached_copy();

    let mut parent_texts: HashMap<String, String> = HashMap::new();
    for edge in live.edges() {
        // Edge endpoints always resolve (graph invariant).
        if let Ok(parent) = live.node(edge.source.as_str()) {
            parent_texts.insert(edge.target.0.clone(), strip_punctuation(&parent.name));
        }
    }

    for node in projected.nodes_mut() {
        let stripped = strip_punctuation(&node.name);
        node.name = match parent_texts.get(node.id.as_str()) {
            Some(parent_text) => {
                let trimmed = trim_label(&stripped, parent_text);
                node.parent_text = Some(parent_text.clone());
                trimmed
            }
            None => stripped,
        };
    }

    projected
}
