//! Outbound commands to the execution service.
//!
//! Commands are fire-and-forget: nothing waits for a reply, and whatever
//! the execution service does in response arrives later as step events.
//! They serialize as small JSON objects discriminated by `event`.

use serde::{Deserialize, Serialize};

/// A command sent to the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Command {
    FineStep,
    Step,
    AutoSolve,
    Pause,
    Reset,
    /// Sent once per session when the view first renders.
    InitialRender,
    /// Answer to `chooseDomainSplit`; `None` asks for the default split.
    DomainSplit { domain: Option<Vec<String>> },
    /// A variable node was clicked.
    #[serde(rename = "var:click", rename_all = "camelCase")]
    VarClick { var_name: String },
    /// A constraint arc was clicked.
    #[serde(rename = "arc:click", rename_all = "camelCase")]
    ArcClick {
        /// Index of the constraint at the arc's target.
        const_id: Option<usize>,
        /// Name of the variable at the arc's source.
        var_name: String,
    },
    /// Request to print the current node positions.
    PrintPositions { nodes: Vec<NodePosition> },
}

impl Command {
    /// The `event` tag this command serializes with.
    pub fn name(&self) -> &'static str {
        match self {
            Command::FineStep => "fine_step",
            Command::Step => "step",
            Command::AutoSolve => "auto_solve",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::InitialRender => "initial_render",
            Command::DomainSplit { .. } => "domain_split",
            Command::VarClick { .. } => "var:click",
            Command::ArcClick { .. } => "arc:click",
            Command::PrintPositions { .. } => "print_positions",
        }
    }
}

/// Identity and position hint of one node, as sent by `print_positions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub id: String,
    pub name: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Where a session delivers its outbound commands.
///
/// Implemented by the transport collaborator; `Vec<Command>` records
/// commands in order, which is what tests and offline replay use.
pub trait CommandSink {
    fn send(&mut self, command: Command);
}

impl CommandSink for Vec<Command> {
    fn send(&mut self, command: Command) {
        self.push(command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn send(&mut self, command: Command) {
        (**self).send(command);
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send(&mut self, command: Command) {
        (**self).send(command);
    }
}
