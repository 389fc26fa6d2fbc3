//! Graph interchange JSON.
//!
//! The execution service describes a graph as `{"nodes": [...], "edges":
//! [...]}` with edges referring to nodes by id. [`GraphJson`] is that flat
//! shape; converting it into a [`VizGraph`] validates the id and endpoint
//! invariants, so a graph can never be loaded half-valid.

use serde::{Deserialize, Serialize};

use crate::edge::VizEdge;
use crate::error::CoreError;
use crate::graph::VizGraph;
use crate::node::VizNode;

/// Flat node/edge lists as exchanged with the execution service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphJson {
    #[serde(default)]
    pub nodes: Vec<VizNode>,
    #[serde(default)]
    pub edges: Vec<VizEdge>,
}

impl TryFrom<GraphJson> for VizGraph {
    type Error = CoreError;

    fn try_from(json: GraphJson) -> Result<Self, Self::Error> {
        VizGraph::from_parts(json.nodes, json.edges)
    }
}

impl From<VizGraph> for GraphJson {
    fn from(graph: VizGraph) -> Self {
        GraphJson::from(&graph)
    }
}

impl From<&VizGraph> for GraphJson {
    fn from(graph: &VizGraph) -> Self {
        GraphJson {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges().cloned().collect(),
        }
    }
}

impl VizGraph {
    /// Decodes a graph from a JSON value.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let json: GraphJson = serde_json::from_value(value).map_err(|e| CoreError::InvalidJson {
            reason: e.to_string(),
        })?;
        VizGraph::try_from(json)
    }

    /// Decodes a graph from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let json: GraphJson = serde_json::from_str(text).map_err(|e| CoreError::InvalidJson {
            reason: e.to_string(),
        })?;
        VizGraph::try_from(json)
    }

    /// Encodes the graph as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(GraphJson::from(self)).map_err(|e| CoreError::EncodeJson {
            reason: e.to_string(),
        })
    }
}
