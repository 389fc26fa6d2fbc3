//! Visualizer configuration.
//!
//! Mirrors the display settings the hosting widget model carries
//! (`lineWidth`, `textSize`, ...). Only `line_width` affects the engine's own
//! behavior; the rest is passed through to the rendering collaborator.

use serde::{Deserialize, Serialize};

/// Extra width added to arcs drawn "bold" and to highlighted paths.
pub const BOLD_EXTRA_WIDTH: f64 = 3.0;

/// Which visualizer a session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizerKind {
    /// Constraint network: variables, constraints and arcs.
    Csp,
    /// Search tree with a trimmed display projection.
    Search,
}

impl VisualizerKind {
    /// Stroke width used by `highlightNodes`.
    pub fn node_highlight_width(self) -> f64 {
        match self {
            VisualizerKind::Csp => 2.0,
            VisualizerKind::Search => 4.0,
        }
    }

    /// Whether this visualizer maintains a projected display graph.
    pub fn has_projection(self) -> bool {
        matches!(self, VisualizerKind::Search)
    }
}

/// Display configuration of a visualizer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
    /// Base stroke width of edges.
    pub line_width: f64,
    pub text_size: f64,
    /// How much detail node labels show (0 = none).
    pub detail_level: u8,
    pub show_edge_costs: bool,
    pub show_node_heuristics: bool,
    /// Decimal places used when printing costs and heuristics.
    pub decimal_place: u8,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        VisualizerConfig {
            line_width: 4.0,
            text_size: 15.0,
            detail_level: 2,
            show_edge_costs: true,
            show_node_heuristics: false,
            decimal_place: 2,
        }
    }
}

impl VisualizerConfig {
    /// Width of bold arcs and highlighted paths.
    pub fn bold_line_width(&self) -> f64 {
        self.line_width + BOLD_EXTRA_WIDTH
    }
}
