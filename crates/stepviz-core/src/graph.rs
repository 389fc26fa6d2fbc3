//! VizGraph: the id-indexed node/edge container behind every visualizer.
//!
//! [`VizGraph`] stores nodes and edges in a petgraph `StableGraph` and keeps
//! an insertion-ordered index from element id to graph index, so lookups by
//! the string ids the execution service sends are O(1).
//!
//! # Invariants
//!
//! - Ids are unique across nodes and edges together.
//! - Every edge's source and target resolve to nodes in the same graph.
//! - Elements are never removed; a reset replaces the whole graph.
//!
//! Style fields are only mutated through [`VizGraph::set_stroke`] and
//! [`VizGraph::set_stroke_width`] (or helpers built on them), which update
//! the field in place and journal the change for the rendering side.

use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::edge::VizEdge;
use crate::error::CoreError;
use crate::json::GraphJson;
use crate::node::{Domain, NodeKind, VizNode};
use crate::style::{self, ChangeJournal, Style, StyleChange};

/// Which kind of element an id names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Edge,
}

/// Position of an element inside the backing `StableGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementIndex {
    Node(NodeIndex<u32>),
    Edge(EdgeIndex<u32>),
}

/// A borrowed node or edge, as returned by [`VizGraph::get`].
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Node(&'a VizNode),
    Edge(&'a VizEdge),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Element::Node(n) => n.id.as_str(),
            Element::Edge(e) => e.id.as_str(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Node(_) => ElementKind::Node,
            Element::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn style(&self) -> &'a Style {
        match self {
            Element::Node(n) => &n.style,
            Element::Edge(e) => &e.style,
        }
    }
}

/// The visualization graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphJson", into = "GraphJson")]
pub struct VizGraph {
    graph: StableGraph<VizNode, VizEdge, Directed, u32>,
    /// Element id -> graph index, in insertion order.
    id_map: IndexMap<String, ElementIndex>,
    /// Style changes not yet drained by the renderer.
    journal: ChangeJournal,
}

impl VizGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from node and edge lists, validating ids and edge
    /// endpoints.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = VizNode>,
        edges: impl IntoIterator<Item = VizEdge>,
    ) -> Result<Self, CoreError> {
        let mut graph = VizGraph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Adds a node. Fails if its id is already used by any element.
    pub fn add_node(&mut self, node: VizNode) -> Result<(), CoreError> {
        if self.id_map.contains_key(node.id.as_str()) {
            return Err(CoreError::DuplicateId { id: node.id.0 });
        }
        let id = node.id.0.clone();
        let idx = self.graph.add_node(node);
        self.id_map.insert(id, ElementIndex::Node(idx));
        Ok(())
    }

    /// Adds an edge. Fails if its id is taken or either endpoint is not a
    /// node of this graph.
    pub fn add_edge(&mut self, edge: VizEdge) -> Result<(), CoreError> {
        if self.id_map.contains_key(edge.id.as_str()) {
            return Err(CoreError::DuplicateId { id: edge.id.0 });
        }
        let source = self.endpoint_index(&edge, "source", edge.source.as_str())?;
        let target = self.endpoint_index(&edge, "target", edge.target.as_str())?;
        let id = edge.id.0.clone();
        let idx = self.graph.add_edge(source, target, edge);
        self.id_map.insert(id, ElementIndex::Edge(idx));
        Ok(())
    }

    fn endpoint_index(
        &self,
        edge: &VizEdge,
        endpoint: &'static str,
        node_id: &str,
    ) -> Result<NodeIndex<u32>, CoreError> {
        match self.id_map.get(node_id) {
            Some(ElementIndex::Node(idx)) => Ok(*idx),
            _ => Err(CoreError::DanglingEdge {
                edge: edge.id.0.clone(),
                endpoint,
                node: node_id.to_string(),
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Looks up any element by id.
    pub fn get(&self, id: &str) -> Result<Element<'_>, CoreError> {
        match self.id_map.get(id) {
            Some(ElementIndex::Node(idx)) => Ok(Element::Node(&self.graph[*idx])),
            Some(ElementIndex::Edge(idx)) => Ok(Element::Edge(&self.graph[*idx])),
            None => Err(CoreError::ElementNotFound { id: id.to_string() }),
        }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Result<&VizNode, CoreError> {
        let idx = self.node_index(id)?;
        Ok(&self.graph[idx])
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: &str) -> Result<&VizEdge, CoreError> {
        let idx = self.edge_index(id)?;
        Ok(&self.graph[idx])
    }

    fn node_index(&self, id: &str) -> Result<NodeIndex<u32>, CoreError> {
        match self.id_map.get(id) {
            Some(ElementIndex::Node(idx)) => Ok(*idx),
            _ => Err(CoreError::NodeNotFound { id: id.to_string() }),
        }
    }

    fn edge_index(&self, id: &str) -> Result<EdgeIndex<u32>, CoreError> {
        match self.id_map.get(id) {
            Some(ElementIndex::Edge(idx)) => Ok(*idx),
            _ => Err(CoreError::EdgeNotFound { id: id.to_string() }),
        }
    }

    /// Returns `true` if any element has this id.
    pub fn contains(&self, id: &str) -> bool {
        self.id_map.contains_key(id)
    }

    /// Returns `true` if `id` names an element of the given kind.
    pub fn contains_kind(&self, kind: ElementKind, id: &str) -> bool {
        matches!(
            (kind, self.id_map.get(id)),
            (ElementKind::Node, Some(ElementIndex::Node(_)))
                | (ElementKind::Edge, Some(ElementIndex::Edge(_)))
        )
    }

    /// Fails with `NodeNotFound` / `EdgeNotFound` for the first id that does
    /// not name an element of `kind`.
    pub fn check_ids<'i>(
        &self,
        kind: ElementKind,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> Result<(), CoreError> {
        for id in ids {
            if !self.contains_kind(kind, id) {
                return Err(match kind {
                    ElementKind::Node => CoreError::NodeNotFound { id: id.to_string() },
                    ElementKind::Edge => CoreError::EdgeNotFound { id: id.to_string() },
                });
            }
        }
        Ok(())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &VizNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &VizEdge> {
        self.graph.edge_weights()
    }

    /// Ids of all elements of `kind`, in insertion order.
    pub fn ids_of(&self, kind: ElementKind) -> impl Iterator<Item = &str> {
        self.id_map.iter().filter_map(move |(id, idx)| match (kind, idx) {
            (ElementKind::Node, ElementIndex::Node(_)) | (ElementKind::Edge, ElementIndex::Edge(_)) => {
                Some(id.as_str())
            }
            _ => None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the (source, target) nodes of an edge.
    pub fn endpoints(&self, edge_id: &str) -> Result<(&VizNode, &VizNode), CoreError> {
        let idx = self.edge_index(edge_id)?;
        let (source, target) = self
            .graph
            .edge_endpoints(idx)
            .ok_or_else(|| CoreError::EdgeNotFound { id: edge_id.to_string() })?;
        Ok((&self.graph[source], &self.graph[target]))
    }

    // -----------------------------------------------------------------------
    // Mutation (field-level, journaled)
    // -----------------------------------------------------------------------

    fn style_mut(&mut self, id: &str) -> Result<(&mut Style, &mut ChangeJournal), CoreError> {
        let style = match self.id_map.get(id) {
            Some(ElementIndex::Node(idx)) => &mut self.graph[*idx].style,
            Some(ElementIndex::Edge(idx)) => &mut self.graph[*idx].style,
            None => return Err(CoreError::ElementNotFound { id: id.to_string() }),
        };
        Ok((style, &mut self.journal))
    }

    /// Restyles every element of `kind` in insertion order. A `None` stroke
    /// keeps each element's color. Returns the number of elements visited.
    pub(crate) fn restyle_all(&mut self, kind: ElementKind, stroke: Option<&str>, width: f64) -> usize {
        let mut count = 0;
        for (id, idx) in &self.id_map {
            let s = match (kind, *idx) {
                (ElementKind::Node, ElementIndex::Node(i)) => &mut self.graph[i].style,
                (ElementKind::Edge, ElementIndex::Edge(i)) => &mut self.graph[i].style,
                _ => continue,
            };
            if let Some(stroke) = stroke {
                style::set_stroke(s, &mut self.journal, id, stroke);
            }
            style::set_stroke_width(s, &mut self.journal, id, width);
            count += 1;
        }
        count
    }

    /// Sets the stroke color of any element.
    pub fn set_stroke(&mut self, id: &str, stroke: &str) -> Result<(), CoreError> {
        let (s, journal) = self.style_mut(id)?;
        style::set_stroke(s, journal, id, stroke);
        Ok(())
    }

    /// Sets the stroke width of any element.
    pub fn set_stroke_width(&mut self, id: &str, width: f64) -> Result<(), CoreError> {
        let (s, journal) = self.style_mut(id)?;
        style::set_stroke_width(s, journal, id, width);
        Ok(())
    }

    /// Sets both style fields, one field at a time.
    pub fn set_style(&mut self, id: &str, stroke: &str, width: f64) -> Result<(), CoreError> {
        let (s, journal) = self.style_mut(id)?;
        style::set_stroke(s, journal, id, stroke);
        style::set_stroke_width(s, journal, id, width);
        Ok(())
    }

    /// Replaces the domain of a variable node.
    pub fn set_domain(&mut self, id: &str, domain: Domain) -> Result<(), CoreError> {
        let idx = self.node_index(id)?;
        match &mut self.graph[idx].kind {
            NodeKind::Variable { domain: d, .. } => {
                *d = domain;
                Ok(())
            }
            _ => Err(CoreError::NotAVariable { id: id.to_string() }),
        }
    }

    /// Mutable node access for derived views; bypasses the style journal.
    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut VizNode> {
        self.graph.node_weights_mut()
    }

    /// Copies styles from `other` for every element id both graphs share.
    ///
    /// Elements that only exist in `self` keep whatever style they have,
    /// which for freshly added frontier nodes is the default.
    pub fn merge_styles_from(&mut self, other: &VizGraph) {
        for (id, idx) in &self.id_map {
            let Ok(theirs) = other.get(id) else {
                continue;
            };
            let ours = match (*idx, theirs.kind()) {
                (ElementIndex::Node(i), ElementKind::Node) => &mut self.graph[i].style,
                (ElementIndex::Edge(i), ElementKind::Edge) => &mut self.graph[i].style,
                _ => continue,
            };
            let style = theirs.style();
            style::set_stroke(ours, &mut self.journal, id, &style.stroke);
            style::set_stroke_width(ours, &mut self.journal, id, style.stroke_width);
        }
    }

    // -----------------------------------------------------------------------
    // Change journal
    // -----------------------------------------------------------------------

    /// Style changes made since the last [`take_changes`](Self::take_changes).
    pub fn pending_changes(&self) -> &[StyleChange] {
        self.journal.pending()
    }

    /// Drains the style change journal.
    pub fn take_changes(&mut self) -> Vec<StyleChange> {
        self.journal.drain()
    }

    /// Returns a deep copy with an empty journal.
    pub fn detached_copy(&self) -> VizGraph {
        VizGraph {
            graph: self.graph.clone(),
            id_map: self.id_map.clone(),
            journal: ChangeJournal::new(),
        }
    }
}

impl PartialEq for VizGraph {
    /// Value equality over nodes and edges in order; the journal is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count()
            && self.edge_count() == other.edge_count()
            && self.nodes().eq(other.nodes())
            && self.edges().eq(other.edges())
    }
}
