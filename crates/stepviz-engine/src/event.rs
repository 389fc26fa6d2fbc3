//! Inbound step events from the execution service.
//!
//! Events are JSON objects discriminated by their `action` field. Parsing
//! happens in two stages so that the dispatcher stays forward-compatible:
//! an action it does not know is skipped, while a known action with a bad
//! payload is a [`EngineError::MalformedEvent`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stepviz_core::{DomainValue, VizGraph};

use crate::error::EngineError;

/// Actions this engine understands.
pub const KNOWN_ACTIONS: [&str; 11] = [
    "highlightArcs",
    "highlightNodes",
    "setDomains",
    "highlightPath",
    "setFrontier",
    "setPreSolution",
    "output",
    "showPositions",
    "clear",
    "frontReset",
    "chooseDomainSplit",
];

/// Line style requested by `highlightArcs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcStyle {
    #[default]
    Normal,
    Bold,
}

/// A step event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum StepEvent {
    /// Restyle some or all arcs. `None` ids mean every arc; a `None` colour
    /// keeps each arc's current stroke.
    #[serde(rename_all = "camelCase")]
    HighlightArcs {
        #[serde(default)]
        arc_ids: Option<Vec<String>>,
        #[serde(default, alias = "color")]
        colour: Option<String>,
        #[serde(default)]
        style: ArcStyle,
    },
    #[serde(rename_all = "camelCase")]
    HighlightNodes {
        node_ids: Vec<String>,
        #[serde(alias = "color")]
        colour: String,
    },
    /// Replace domains; `node_ids[i]` gets `domains[i]`.
    #[serde(rename_all = "camelCase")]
    SetDomains {
        node_ids: Vec<String>,
        domains: Vec<Vec<DomainValue>>,
    },
    /// Highlight an ordered path of edges.
    HighlightPath {
        path: Vec<String>,
        #[serde(alias = "color")]
        colour: String,
    },
    SetFrontier { frontier: Vec<Value> },
    SetPreSolution { solution: Value, cost: Value },
    Output { text: String },
    ShowPositions { positions: String },
    Clear,
    /// Full reset. A carried graph replaces the snapshot first.
    FrontReset {
        #[serde(default)]
        graph: Option<VizGraph>,
    },
    ChooseDomainSplit { domain: Vec<DomainValue> },
}

impl StepEvent {
    /// Parses a raw event.
    ///
    /// Returns `Ok(None)` for events without a recognised `action`.
    pub fn parse(raw: &Value) -> Result<Option<StepEvent>, EngineError> {
        let Some(action) = raw.get("action").and_then(Value::as_str) else {
            return Ok(None);
        };
        if !KNOWN_ACTIONS.contains(&action) {
            return Ok(None);
        }

        let event: StepEvent = serde_json::from_value(raw.clone())
            .map_err(|e| EngineError::malformed(action, e.to_string()))?;
        event.validate()?;
        Ok(Some(event))
    }

    /// Checks cross-field consistency serde cannot express.
    pub fn validate(&self) -> Result<(), EngineError> {
        if let StepEvent::SetDomains { node_ids, domains } = self {
            if node_ids.len() != domains.len() {
                return Err(EngineError::malformed(
                    self.action(),
                    format!(
                        "{} node ids but {} domains",
                        node_ids.len(),
                        domains.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// The `action` tag of this event.
    pub fn action(&self) -> &'static str {
        match self {
            StepEvent::HighlightArcs { .. } => "highlightArcs",
            StepEvent::HighlightNodes { .. } => "highlightNodes",
            StepEvent::SetDomains { .. } => "setDomains",
            StepEvent::HighlightPath { .. } => "highlightPath",
            StepEvent::SetFrontier { .. } => "setFrontier",
            StepEvent::SetPreSolution { .. } => "setPreSolution",
            StepEvent::Output { .. } => "output",
            StepEvent::ShowPositions { .. } => "showPositions",
            StepEvent::Clear => "clear",
            StepEvent::FrontReset { .. } => "frontReset",
            StepEvent::ChooseDomainSplit { .. } => "chooseDomainSplit",
        }
    }
}

/// Formats one solution log entry the way the search visualizer prints it.
pub fn format_solution(solution: &Value, cost: &Value) -> String {
    format!("\n        {} (cost: {})", plain(solution), plain(cost))
}

/// JSON strings without their quotes; everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
