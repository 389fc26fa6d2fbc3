//! Step event dispatch.
//!
//! Every event is validated against the current graphs before anything is
//! mutated, so a failing event leaves the session exactly as it was.

use serde_json::Value;

use stepviz_core::node::join_domain;
use stepviz_core::overlay::{self, Targets};
use stepviz_core::{CoreError, Domain, DomainValue, ElementKind, VizGraph};

use crate::command::{Command, CommandSink};
use crate::config::VisualizerKind;
use crate::error::EngineError;
use crate::event::{format_solution, ArcStyle, StepEvent};
use crate::prompt::{parse_split, SPLIT_PROMPT_MESSAGE};
use crate::session::{Dispatch, Session};

impl<S: CommandSink> Session<S> {
    /// Parses and applies one raw event from the execution service.
    pub fn dispatch(&mut self, raw: &Value) -> Result<Dispatch, EngineError> {
        let event = match StepEvent::parse(raw) {
            Ok(Some(event)) => event,
            Ok(None) => {
                tracing::debug!("ignoring event with unknown action: {}", raw);
                return Ok(Dispatch::Ignored);
            }
            Err(err) => {
                tracing::warn!("dropping event: {}", err);
                return Err(err);
            }
        };
        self.apply(event)
    }

    /// Applies an already parsed event.
    pub fn apply(&mut self, event: StepEvent) -> Result<Dispatch, EngineError> {
        let action = event.action();
        tracing::debug!("dispatching {}", action);
        match self.apply_event(event) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::warn!("dropping {} event: {}", action, err);
                Err(err)
            }
        }
    }

    fn apply_event(&mut self, event: StepEvent) -> Result<Dispatch, EngineError> {
        event.validate()?;
        match event {
            StepEvent::HighlightArcs {
                arc_ids,
                colour,
                style,
            } => {
                let width = match style {
                    ArcStyle::Normal => self.model.config.line_width,
                    ArcStyle::Bold => self.model.config.bold_line_width(),
                };
                self.stroke_both(ElementKind::Edge, &arc_ids.into(), colour.as_deref(), width)?;
            }
            StepEvent::HighlightNodes { node_ids, colour } => {
                let width = self.kind.node_highlight_width();
                self.stroke_both(ElementKind::Node, &Targets::Ids(node_ids), Some(&colour), width)?;
            }
            StepEvent::SetDomains { node_ids, domains } => {
                self.set_domains(&node_ids, domains)?;
            }
            StepEvent::HighlightPath { path, colour } => {
                let width = self.model.config.bold_line_width();
                self.stroke_both(ElementKind::Edge, &Targets::Ids(path), Some(&colour), width)?;
            }
            StepEvent::SetFrontier { frontier } => {
                self.display.frontier = frontier;
            }
            StepEvent::SetPreSolution { solution, cost } => {
                self.display
                    .pre_solution
                    .push_str(&format_solution(&solution, &cost));
            }
            StepEvent::Output { text } => {
                self.display.output = text;
            }
            StepEvent::ShowPositions { positions } => {
                let showing = &mut self.display.positions;
                if !showing.is_empty() && *showing == positions {
                    showing.clear();
                } else {
                    *showing = positions;
                }
            }
            StepEvent::Clear => self.clear_styles(),
            StepEvent::FrontReset { graph } => self.front_reset(graph)?,
            StepEvent::ChooseDomainSplit { domain } => {
                if self.kind != VisualizerKind::Csp {
                    tracing::debug!("ignoring chooseDomainSplit on a {:?} session", self.kind);
                    return Ok(Dispatch::Ignored);
                }
                // Nothing may be sent ahead of initial_render.
                if !self.state.is_initialized() {
                    return Err(EngineError::NotInitialized);
                }
                self.choose_domain_split(&domain);
            }
        }
        Ok(Dispatch::Applied)
    }

    /// Strokes the live graph and, if present, the projection. The
    /// projection shares the live graph's ids, so validating once suffices.
    fn stroke_both(
        &mut self,
        kind: ElementKind,
        targets: &Targets,
        stroke: Option<&str>,
        width: f64,
    ) -> Result<(), EngineError> {
        overlay::apply_stroke(&mut self.model.graph, kind, targets, stroke, width)?;
        if let Some(projection) = &mut self.projection {
            overlay::apply_stroke(projection, kind, targets, stroke, width)?;
        }
        Ok(())
    }

    fn set_domains(
        &mut self,
        node_ids: &[String],
        domains: Vec<Vec<DomainValue>>,
    ) -> Result<(), EngineError> {
        let graph = &self.model.graph;
        graph.check_ids(ElementKind::Node, node_ids.iter().map(String::as_str))?;
        if let Some(id) = node_ids
            .iter()
            .find(|id| graph.node(id).is_ok_and(|n| !n.kind.is_variable()))
        {
            return Err(CoreError::NotAVariable { id: id.clone() }.into());
        }

        for (id, domain) in node_ids.iter().zip(domains) {
            self.model.graph.set_domain(id, Domain::from_vec(domain))?;
        }
        Ok(())
    }

    fn front_reset(&mut self, graph: Option<VizGraph>) -> Result<(), EngineError> {
        if !self.state.is_initialized() {
            return Err(EngineError::NotInitialized);
        }
        if let Some(mut graph) = graph {
            overlay::clear(&mut graph, self.model.config.line_width);
            self.snapshot = Some(graph.detached_copy());
        }
        self.full_reset()
    }

    fn choose_domain_split(&mut self, domain: &[DomainValue]) {
        let default = join_domain(domain);
        let answer = self.prompt.ask(SPLIT_PROMPT_MESSAGE, &default);
        let domain = parse_split(answer.as_deref());
        self.send(Command::DomainSplit { domain });
    }
}
