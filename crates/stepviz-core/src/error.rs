//! Core error types for stepviz-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of the graph model: lookups of ids the graph does not
//! hold, and graph construction that would break the id or endpoint
//! invariants.

use thiserror::Error;

/// Core errors produced by the stepviz-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No node or edge with this id exists.
    #[error("element not found: '{id}'")]
    ElementNotFound { id: String },

    /// The id does not name a node (it is absent or names an edge).
    #[error("node not found: '{id}'")]
    NodeNotFound { id: String },

    /// The id does not name an edge (it is absent or names a node).
    #[error("edge not found: '{id}'")]
    EdgeNotFound { id: String },

    /// The node exists but has no domain (it is not a CSP variable).
    #[error("node '{id}' is not a variable")]
    NotAVariable { id: String },

    /// Attempting to add an element whose id is already taken.
    #[error("duplicate element id: '{id}'")]
    DuplicateId { id: String },

    /// An edge endpoint does not resolve to a node in the graph.
    #[error("edge '{edge}' references missing {endpoint} node '{node}'")]
    DanglingEdge {
        edge: String,
        endpoint: &'static str,
        node: String,
    },

    /// Graph interchange JSON could not be decoded.
    #[error("invalid graph json: {reason}")]
    InvalidJson { reason: String },

    /// A graph could not be encoded as interchange JSON.
    #[error("cannot encode graph json: {reason}")]
    EncodeJson { reason: String },
}

impl CoreError {
    /// Returns the offending id for lookup failures.
    pub fn missing_id(&self) -> Option<&str> {
        match self {
            CoreError::ElementNotFound { id }
            | CoreError::NodeNotFound { id }
            | CoreError::EdgeNotFound { id } => Some(id),
            _ => None,
        }
    }
}
