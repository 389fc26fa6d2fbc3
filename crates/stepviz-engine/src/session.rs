//! Visualizer session: owns the live graph, its projection, the transient
//! display fields and the stepping state.
//!
//! A [`Session`] is one view over a [`SessionModel`]. The model is what the
//! host persists (the graph, the display config and whether the initial
//! render handshake already happened); the session holds everything that
//! only lives as long as the view.
//!
//! # Lifecycle
//!
//! 1. [`Session::new`]: build over a model; nothing is sent.
//! 2. [`Session::render`]: arm the deferred first paint.
//! 3. [`Session::run_deferred`]: called by the host at the end of the
//!    scheduling turn. Performs the first paint and, unless the model was
//!    rendered before, sends `initial_render`.
//! 4. [`Session::dispatch`] / user commands, in any order, one at a time.
//! 5. [`Session::teardown`]: after this, a pending first paint is a no-op.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use stepviz_core::overlay;
use stepviz_core::projector;
use stepviz_core::{ElementKind, StyleChange, VizGraph};

use crate::command::{Command, CommandSink, NodePosition};
use crate::config::{VisualizerConfig, VisualizerKind};
use crate::control::{StepCommand, StepState};
use crate::error::EngineError;
use crate::prompt::{CancelPrompt, SplitPrompt};

/// Host-persisted state of a visualizer widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionModel {
    pub graph: VizGraph,
    #[serde(default)]
    pub config: VisualizerConfig,
    /// Set once `initial_render` has been sent for this model.
    #[serde(default)]
    pub previously_rendered: bool,
}

impl SessionModel {
    pub fn new(graph: VizGraph, config: VisualizerConfig) -> Self {
        SessionModel {
            graph,
            config,
            previously_rendered: false,
        }
    }
}

/// Transient display fields read by the rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayFields {
    /// Free-text status line.
    pub output: String,
    /// Current search frontier, verbatim from the execution service.
    pub frontier: Vec<Value>,
    /// Accumulated solution log.
    pub pre_solution: String,
    /// Printed node positions, or empty when hidden.
    pub positions: String,
}

/// Where the view is in its mount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; `render` has not been called.
    Detached,
    /// First paint armed, waiting for the end of the scheduling turn.
    Scheduled,
    /// First paint done.
    Mounted,
    /// Torn down; deferred work must not touch anything.
    TornDown,
}

/// Style changes drained from both graphs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleChanges {
    pub live: Vec<StyleChange>,
    pub projected: Vec<StyleChange>,
}

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    /// Unknown action, or an action this visualizer does not handle.
    Ignored,
}

/// One visualizer view driving a [`SessionModel`].
pub struct Session<S: CommandSink> {
    pub(crate) kind: VisualizerKind,
    pub(crate) model: SessionModel,
    pub(crate) sink: S,
    pub(crate) prompt: Box<dyn SplitPrompt>,
    pub(crate) state: StepState,
    pub(crate) lifecycle: Lifecycle,
    /// Graph restored by a reset. Set at first paint.
    pub(crate) snapshot: Option<VizGraph>,
    /// Trimmed search view; `None` for CSP sessions.
    pub(crate) projection: Option<VizGraph>,
    pub(crate) show_full_domain: bool,
    pub(crate) display: DisplayFields,
    /// Bumped whenever a graph is replaced rather than restyled.
    pub(crate) revision: u64,
}

impl<S: CommandSink> Session<S> {
    /// Creates a session over `model`. Split prompts are cancelled until a
    /// prompt is installed with [`with_prompt`](Self::with_prompt).
    pub fn new(kind: VisualizerKind, model: SessionModel, sink: S) -> Self {
        let projection = kind.has_projection().then(|| projector::project(&model.graph));
        Session {
            kind,
            model,
            sink,
            prompt: Box::new(CancelPrompt),
            state: StepState::Uninitialized,
            lifecycle: Lifecycle::Detached,
            snapshot: None,
            projection,
            show_full_domain: false,
            display: DisplayFields::default(),
            revision: 0,
        }
    }

    /// Installs the prompt used for `chooseDomainSplit`.
    pub fn with_prompt(mut self, prompt: impl SplitPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    // -----------------------------------------------------------------------
    // Render lifecycle
    // -----------------------------------------------------------------------

    /// Arms the deferred first paint. Repeated calls are no-ops.
    pub fn render(&mut self) {
        if self.lifecycle == Lifecycle::Detached {
            self.lifecycle = Lifecycle::Scheduled;
        }
    }

    /// Fires the deferred first paint, if one is armed and the view is still
    /// alive. Returns `true` if it ran.
    pub fn run_deferred(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Scheduled {
            return false;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.first_paint();
        true
    }

    /// Tears the view down. A first paint armed before this never runs.
    pub fn teardown(&mut self) {
        self.lifecycle = Lifecycle::TornDown;
    }

    fn first_paint(&mut self) {
        let base = self.model.config.line_width;
        let mut snapshot = self.model.graph.detached_copy();
        overlay::clear(&mut snapshot, base);
        self.snapshot = Some(snapshot);
        self.state = StepState::Ready;

        if self.model.previously_rendered {
            tracing::debug!("view reloaded over a rendered model; skipping initial_render");
            return;
        }
        self.model.previously_rendered = true;
        tracing::info!("initial render of {:?} visualizer", self.kind);
        self.send(Command::InitialRender);

        if self.kind == VisualizerKind::Csp {
            overlay::stroke_all(&mut self.model.graph, ElementKind::Edge, Some("blue"), base);
        }
    }

    // -----------------------------------------------------------------------
    // Stepping control
    // -----------------------------------------------------------------------

    pub fn fine_step(&mut self) -> Result<(), EngineError> {
        self.control(StepCommand::FineStep)
    }

    pub fn step(&mut self) -> Result<(), EngineError> {
        self.control(StepCommand::Step)
    }

    pub fn auto_solve(&mut self) -> Result<(), EngineError> {
        self.control(StepCommand::AutoSolve)
    }

    pub fn pause(&mut self) -> Result<(), EngineError> {
        self.control(StepCommand::Pause)
    }

    /// Sends `reset` and restores the snapshot locally.
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.control(StepCommand::Reset)?;
        self.full_reset()
    }

    fn control(&mut self, command: StepCommand) -> Result<(), EngineError> {
        let next = match self.state.transition(command) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!("rejected {}: {}", command.name(), err);
                return Err(err);
            }
        };
        self.send(command.command());
        self.state = next;
        Ok(())
    }

    /// Restores the live graph from the snapshot and clears every transient
    /// display field. Leaves the session `Ready`.
    pub(crate) fn full_reset(&mut self) -> Result<(), EngineError> {
        let Some(snapshot) = &self.snapshot else {
            return Err(EngineError::NotInitialized);
        };
        self.model.graph = snapshot.detached_copy();
        self.display = DisplayFields::default();
        self.reproject();
        self.clear_styles();
        self.state = StepState::Ready;
        self.revision += 1;
        tracing::info!("session reset to snapshot");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // User interaction
    // -----------------------------------------------------------------------

    /// A node was clicked: sends `var:click` with its (untrimmed) name.
    pub fn click_node(&mut self, node_id: &str) -> Result<(), EngineError> {
        self.require_initialized()?;
        let var_name = self.model.graph.node(node_id)?.name.clone();
        self.send(Command::VarClick { var_name });
        Ok(())
    }

    /// An arc was clicked: sends `arc:click` with the target constraint's
    /// index and the source variable's name.
    pub fn click_edge(&mut self, edge_id: &str) -> Result<(), EngineError> {
        self.require_initialized()?;
        let (source, target) = self.model.graph.endpoints(edge_id)?;
        let command = Command::ArcClick {
            const_id: target.kind.idx(),
            var_name: source.name.clone(),
        };
        self.send(command);
        Ok(())
    }

    /// Sends the displayed graph's node positions.
    pub fn print_positions(&mut self) -> Result<(), EngineError> {
        self.require_initialized()?;
        let nodes = self
            .displayed_graph()
            .nodes()
            .map(|n| NodePosition {
                id: n.id.0.clone(),
                name: n.name.clone(),
                x: n.x,
                y: n.y,
            })
            .collect();
        self.send(Command::PrintPositions { nodes });
        Ok(())
    }

    /// Switches the search view between the full live graph and the trimmed
    /// projection. No backend round-trip. Returns the new mode, or `None`
    /// for visualizers without a projection.
    pub fn toggle_full_domain(&mut self) -> Option<bool> {
        if !self.kind.has_projection() {
            return None;
        }
        self.show_full_domain = !self.show_full_domain;
        self.reproject();
        self.revision += 1;
        Some(self.show_full_domain)
    }

    /// Replaces the live graph with one the execution service grew (for
    /// example with new frontier nodes), carrying over existing styles.
    pub fn sync_graph(&mut self, mut graph: VizGraph) {
        graph.merge_styles_from(&self.model.graph);
        // Styles carried over are not news to the renderer.
        graph.take_changes();
        self.model.graph = graph;
        self.reproject();
        self.revision += 1;
    }

    // -----------------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------------

    pub(crate) fn send(&mut self, command: Command) {
        tracing::debug!("sending {}", command.name());
        self.sink.send(command);
    }

    fn require_initialized(&self) -> Result<(), EngineError> {
        if self.state.is_initialized() {
            Ok(())
        } else {
            Err(EngineError::NotInitialized)
        }
    }

    /// Recomputes the projection from the live graph (search only).
    pub(crate) fn reproject(&mut self) {
        if self.kind.has_projection() {
            self.projection = Some(projector::project(&self.model.graph));
        }
    }

    /// Resets styles on the live graph and on the projection.
    pub(crate) fn clear_styles(&mut self) {
        let base = self.model.config.line_width;
        overlay::clear(&mut self.model.graph, base);
        if let Some(projection) = &mut self.projection {
            overlay::clear(projection, base);
        }
    }

    // -----------------------------------------------------------------------
    // Observe surface
    // -----------------------------------------------------------------------

    pub fn kind(&self) -> VisualizerKind {
        self.kind
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn model(&self) -> &SessionModel {
        &self.model
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.model.config
    }

    /// The live graph.
    pub fn graph(&self) -> &VizGraph {
        &self.model.graph
    }

    /// The trimmed search view, if this visualizer has one.
    pub fn projection(&self) -> Option<&VizGraph> {
        self.projection.as_ref()
    }

    /// The graph the renderer should draw right now.
    pub fn displayed_graph(&self) -> &VizGraph {
        match &self.projection {
            Some(projection) if !self.show_full_domain => projection,
            _ => &self.model.graph,
        }
    }

    pub fn snapshot(&self) -> Option<&VizGraph> {
        self.snapshot.as_ref()
    }

    pub fn shows_full_domain(&self) -> bool {
        self.show_full_domain
    }

    pub fn display(&self) -> &DisplayFields {
        &self.display
    }

    pub fn output(&self) -> &str {
        &self.display.output
    }

    pub fn frontier(&self) -> &[Value] {
        &self.display.frontier
    }

    pub fn pre_solution(&self) -> &str {
        &self.display.pre_solution
    }

    pub fn positions(&self) -> &str {
        &self.display.positions
    }

    /// Incremented every time a graph is swapped out wholesale; a renderer
    /// seeing a new revision redraws instead of applying style changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drains the style change journals of both graphs.
    pub fn take_style_changes(&mut self) -> StyleChanges {
        StyleChanges {
            live: self.model.graph.take_changes(),
            projected: self
                .projection
                .as_mut()
                .map(VizGraph::take_changes)
                .unwrap_or_default(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the session, returning the model for the host to persist.
    pub fn into_model(self) -> SessionModel {
        self.model
    }
}
