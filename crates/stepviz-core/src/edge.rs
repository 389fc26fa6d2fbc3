//! Graph edges.
//!
//! In a CSP graph an edge is a constraint arc from a variable to a
//! constraint node. In a search graph it is a transition from a state to a
//! successor state, optionally carrying the transition cost.

use serde::{Deserialize, Serialize};

use crate::id::{EdgeId, NodeId};
use crate::style::Style;

/// An edge in the visualization graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, rename = "styles")]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Optional edge label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl VizEdge {
    /// Creates an edge with default style, no cost and no label.
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        VizEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            style: Style::default(),
            cost: None,
            name: None,
        }
    }

    /// Sets the transition cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}
