//! Graph nodes: CSP variables and constraints, and search states.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::NodeId;
use crate::style::Style;

/// A single value label in a variable's domain.
///
/// The execution service sends domains as JSON arrays of whatever the
/// variable ranges over (integers, strings, booleans), so the label keeps
/// the JSON scalar it arrived as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainValue::Bool(b) => write!(f, "{}", b),
            DomainValue::Int(i) => write!(f, "{}", i),
            DomainValue::Float(x) => write!(f, "{}", x),
            DomainValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DomainValue {
    fn from(s: &str) -> Self {
        DomainValue::Text(s.to_string())
    }
}

impl From<i64> for DomainValue {
    fn from(i: i64) -> Self {
        DomainValue::Int(i)
    }
}

/// Ordered domain of a variable node. Most CSP domains are tiny.
pub type Domain = SmallVec<[DomainValue; 8]>;

/// Joins a domain's labels with commas, the form offered when prompting for
/// a domain split.
pub fn join_domain(domain: &[DomainValue]) -> String {
    domain
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// What a node represents, tagged by the `type` field of the interchange
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    /// A CSP variable with its current domain.
    #[serde(rename = "csp:variable")]
    Variable {
        #[serde(default)]
        idx: usize,
        #[serde(default)]
        domain: Domain,
    },
    /// A CSP constraint; `idx` is its position in the constraint list.
    #[serde(rename = "csp:constraint")]
    Constraint {
        #[serde(default)]
        idx: usize,
        /// Value combinations of the scope for which the constraint holds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        combinations_for_true: Option<Vec<Vec<DomainValue>>>,
    },
    #[serde(rename = "search:start")]
    SearchStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        h: Option<f64>,
    },
    #[serde(rename = "search:goal")]
    SearchGoal {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        h: Option<f64>,
    },
    #[serde(rename = "search:regular")]
    SearchRegular {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        h: Option<f64>,
    },
}

impl NodeKind {
    /// Returns `true` for CSP variable nodes.
    pub fn is_variable(&self) -> bool {
        matches!(self, NodeKind::Variable { .. })
    }

    /// Returns the constraint/variable index for CSP nodes.
    pub fn idx(&self) -> Option<usize> {
        match self {
            NodeKind::Variable { idx, .. } | NodeKind::Constraint { idx, .. } => Some(*idx),
            _ => None,
        }
    }

    /// Returns the heuristic value for search nodes, if the backend sent one.
    pub fn heuristic(&self) -> Option<f64> {
        match self {
            NodeKind::SearchStart { h } | NodeKind::SearchGoal { h } | NodeKind::SearchRegular { h } => {
                *h
            }
            _ => None,
        }
    }
}

/// A node in the visualization graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizNode {
    pub id: NodeId,
    /// Display name. For search nodes this is the full path label.
    pub name: String,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, rename = "styles")]
    pub style: Style,
    /// Parent label with punctuation stripped; only set on projected graphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl VizNode {
    /// Creates a node with default style and no position hint.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        VizNode {
            id: id.into(),
            name: name.into(),
            kind,
            style: Style::default(),
            parent_text: None,
            x: None,
            y: None,
        }
    }

    /// Creates a CSP variable node.
    pub fn variable(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        idx: usize,
        domain: impl IntoIterator<Item = DomainValue>,
    ) -> Self {
        VizNode::new(
            id,
            name,
            NodeKind::Variable {
                idx,
                domain: domain.into_iter().collect(),
            },
        )
    }

    /// Creates a CSP constraint node.
    pub fn constraint(id: impl Into<NodeId>, name: impl Into<String>, idx: usize) -> Self {
        VizNode::new(
            id,
            name,
            NodeKind::Constraint {
                idx,
                combinations_for_true: None,
            },
        )
    }

    /// Creates a regular search node.
    pub fn search(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        VizNode::new(id, name, NodeKind::SearchRegular { h: None })
    }

    /// Returns the domain of a variable node.
    pub fn domain(&self) -> Option<&[DomainValue]> {
        match &self.kind {
            NodeKind::Variable { domain, .. } => Some(domain.as_slice()),
            _ => None,
        }
    }

    /// Sets the position hint.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }
}
