//! Session engine that keeps a rendered algorithm graph in sync with a
//! remote execution service.
//!
//! # Architecture
//!
//! - [`Session`] owns the live graph, the search projection, the transient
//!   display fields and the stepping state of one visualizer view.
//! - [`StepEvent`] is an inbound message; [`Session::dispatch`] parses and
//!   applies it, skipping actions it does not know.
//! - [`Command`] is an outbound message, delivered through a
//!   [`CommandSink`].
//! - [`StepState`] tracks the stepping protocol:
//!   `Uninitialized -> Ready -> (Stepping <-> Paused)`.
//! - [`SplitPrompt`] asks the user how to split a CSP domain.
//!
//! # Usage
//!
//! ```ignore
//! let mut session = Session::new(VisualizerKind::Search, model, Vec::new());
//! session.render();
//! session.run_deferred(); // end of the scheduling turn
//! session.dispatch(&json!({"action": "output", "text": "expanding s"}))?;
//! session.step()?;
//! ```

pub mod command;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod prompt;
pub mod session;

pub use command::{Command, CommandSink, NodePosition};
pub use config::{VisualizerConfig, VisualizerKind};
pub use control::{StepCommand, StepState};
pub use error::EngineError;
pub use event::StepEvent;
pub use prompt::SplitPrompt;
pub use session::{DisplayFields, Dispatch, Lifecycle, Session, SessionModel, StyleChanges};
