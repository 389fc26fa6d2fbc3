//! Style overlay: highlight and reset operations over a [`VizGraph`].
//!
//! Overlay operations address elements either all at once or by an explicit
//! id set. An id set is validated in full before any style is touched, so a
//! request naming a stale id fails with `NodeNotFound` / `EdgeNotFound` and
//! leaves the graph unchanged. Applying the same overlay twice is a no-op
//! the second time (last write wins, nothing accumulates).

use crate::error::CoreError;
use crate::graph::{ElementKind, VizGraph};
use crate::style::{DEFAULT_NODE_WIDTH, DEFAULT_STROKE};

/// Which elements an overlay applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Every element of the addressed kind.
    All,
    /// Exactly these ids, in order.
    Ids(Vec<String>),
}

impl Targets {
    /// Builds an id set from anything string-like.
    pub fn ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Targets::Ids(ids.into_iter().map(Into::into).collect())
    }
}

impl From<Option<Vec<String>>> for Targets {
    /// `None` (a JSON `null` id list) means every element.
    fn from(ids: Option<Vec<String>>) -> Self {
        match ids {
            Some(ids) => Targets::Ids(ids),
            None => Targets::All,
        }
    }
}

/// Applies a stroke color and width to the targeted elements of `kind`.
///
/// A `None` stroke keeps each element's current color and only sets the
/// width. Returns the number of elements addressed.
pub fn apply_stroke(
    graph: &mut VizGraph,
    kind: ElementKind,
    targets: &Targets,
    stroke: Option<&str>,
    width: f64,
) -> Result<usize, CoreError> {
    let ids = match targets {
        Targets::All => return Ok(stroke_all(graph, kind, stroke, width)),
        Targets::Ids(ids) => ids,
    };
    graph.check_ids(kind, ids.iter().map(String::as_str))?;

    for id in ids {
        if let Some(stroke) = stroke {
            graph.set_stroke(id, stroke)?;
        }
        graph.set_stroke_width(id, width)?;
    }
    Ok(ids.len())
}

/// Applies a stroke to every element of `kind`. Cannot fail, since no id
/// is looked up. Returns the number of elements styled.
pub fn stroke_all(graph: &mut VizGraph, kind: ElementKind, stroke: Option<&str>, width: f64) -> usize {
    graph.restyle_all(kind, stroke, width)
}

/// Resets every node to (`black`, 1) and every edge to (`black`,
/// `base_line_width`).
pub fn clear(graph: &mut VizGraph, base_line_width: f64) {
    stroke_all(graph, ElementKind::Node, Some(DEFAULT_STROKE), DEFAULT_NODE_WIDTH);
    stroke_all(graph, ElementKind::Edge, Some(DEFAULT_STROKE), base_line_width);
}
