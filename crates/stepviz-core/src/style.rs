//! Element styles and the change journal that makes style updates
//! observable.
//!
//! A [`Style`] is never replaced wholesale once an element exists: the graph
//! exposes field-level setters that mutate one field in place and, when the
//! value actually changes, append a [`StyleChange`] to the graph's
//! [`ChangeJournal`]. A rendering collaborator drains the journal to learn
//! exactly which fields to repaint.

use serde::{Deserialize, Serialize};

/// Stroke color used for unhighlighted elements.
pub const DEFAULT_STROKE: &str = "black";

/// Stroke width of an unhighlighted node.
pub const DEFAULT_NODE_WIDTH: f64 = 1.0;

/// Stroke attributes of a node or edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Stroke color (any CSS color string).
    pub stroke: String,
    /// Stroke width in display units.
    pub stroke_width: f64,
}

impl Style {
    /// Creates a style with the given stroke and width.
    pub fn new(stroke: impl Into<String>, stroke_width: f64) -> Self {
        Style {
            stroke: stroke.into(),
            stroke_width,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::new(DEFAULT_STROKE, DEFAULT_NODE_WIDTH)
    }
}

/// The new value of a single style field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum StyleValue {
    Stroke(String),
    StrokeWidth(f64),
}

/// One observed field-level style mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleChange {
    /// Id of the node or edge whose style changed.
    pub id: String,
    #[serde(flatten)]
    pub value: StyleValue,
}

/// Ordered record of style mutations since the last drain.
#[derive(Debug, Clone, Default)]
pub struct ChangeJournal {
    entries: Vec<StyleChange>,
}

impl ChangeJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, id: &str, value: StyleValue) {
        self.entries.push(StyleChange {
            id: id.to_string(),
            value,
        });
    }

    /// Returns the pending changes without consuming them.
    pub fn pending(&self) -> &[StyleChange] {
        &self.entries
    }

    /// Removes and returns all pending changes.
    pub fn drain(&mut self) -> Vec<StyleChange> {
        std::mem::take(&mut self.entries)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Sets `style.stroke` in place, journaling the change if the value differs.
pub(crate) fn set_stroke(style: &mut Style, journal: &mut ChangeJournal, id: &str, stroke: &str) {
    if style.stroke != stroke {
        style.stroke.clear();
        style.stroke.push_str(stroke);
        journal.record(id, StyleValue::Stroke(stroke.to_string()));
    }
}

/// Sets `style.stroke_width` in place, journaling the change if the value differs.
pub(crate) fn set_stroke_width(
    style: &mut Style,
    journal: &mut ChangeJournal,
    id: &str,
    width: f64,
) {
    if style.stroke_width != width {
        style.stroke_width = width;
        journal.record(id, StyleValue::StrokeWidth(width));
    }
}
