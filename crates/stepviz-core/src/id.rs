//! Stable ID newtypes for graph elements.
//!
//! Ids originate from the execution service and are opaque strings (the
//! backend hashes its variables and constraints). Node and edge ids share a
//! single namespace inside a [`VizGraph`](crate::graph::VizGraph), but are
//! distinct newtypes so a `NodeId` cannot be passed where an `EdgeId` is
//! expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node (variable, constraint, or search state).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Identifier of an edge (constraint arc or search transition).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl NodeId {
    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EdgeId {
    /// Returns the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        EdgeId(s.to_string())
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        EdgeId(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(format!("{}", NodeId::from("-4121")), "-4121");
    }

    #[test]
    fn edge_id_display() {
        assert_eq!(format!("{}", EdgeId::from("e7")), "e7");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&NodeId::from("A")).unwrap();
        assert_eq!(json, "\"A\"");

        let back: EdgeId = serde_json::from_str("\"A-B\"").unwrap();
        assert_eq!(back.as_str(), "A-B");
    }
}
