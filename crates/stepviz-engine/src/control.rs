//! Stepping control state machine.
//!
//! The session's stepping state follows
//! `Uninitialized -> Ready -> Stepping <-> Paused`. The only way out of
//! `Uninitialized` is the initial-render handshake; every user command is
//! validated against the current state before anything is sent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::EngineError;

/// Stepping state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// The initial render handshake has not happened yet.
    Uninitialized,
    /// Initialized and idle; nothing has been stepped since the last reset.
    Ready,
    /// The execution service is auto-solving continuously.
    Stepping,
    /// Idle after a single step or a pause.
    Paused,
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepState::Uninitialized => "uninitialized",
            StepState::Ready => "ready",
            StepState::Stepping => "stepping",
            StepState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// A user-issued stepping command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    FineStep,
    Step,
    AutoSolve,
    Pause,
    Reset,
}

impl StepCommand {
    pub fn name(self) -> &'static str {
        match self {
            StepCommand::FineStep => "fine_step",
            StepCommand::Step => "step",
            StepCommand::AutoSolve => "auto_solve",
            StepCommand::Pause => "pause",
            StepCommand::Reset => "reset",
        }
    }

    /// The outbound command sent for this step command.
    pub fn command(self) -> Command {
        match self {
            StepCommand::FineStep => Command::FineStep,
            StepCommand::Step => Command::Step,
            StepCommand::AutoSolve => Command::AutoSolve,
            StepCommand::Pause => Command::Pause,
            StepCommand::Reset => Command::Reset,
        }
    }
}

impl StepState {
    /// Returns the state after `command`, or why it is not allowed now.
    ///
    /// - `fine_step`, `step`: Ready/Paused -> Paused
    /// - `auto_solve`: Ready/Paused -> Stepping
    /// - `pause`: Stepping -> Paused
    /// - `reset`: any initialized state -> Ready
    pub fn transition(self, command: StepCommand) -> Result<StepState, EngineError> {
        use StepCommand::*;
        use StepState::*;

        match (self, command) {
            (Uninitialized, _) => Err(EngineError::NotInitialized),
            (Ready | Paused, FineStep | Step) => Ok(Paused),
            (Ready | Paused, AutoSolve) => Ok(Stepping),
            (Stepping, Pause) => Ok(Paused),
            (_, Reset) => Ok(Ready),
            (state, command) => Err(EngineError::InvalidTransition {
                command: command.name(),
                state,
            }),
        }
    }

    /// Returns `true` once the initial render handshake has completed.
    pub fn is_initialized(self) -> bool {
        self != StepState::Uninitialized
    }
}
