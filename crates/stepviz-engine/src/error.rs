//! Engine error types.
//!
//! [`EngineError`] is what dispatching an event or issuing a command can
//! fail with. Lookup failures from the graph model are folded into
//! [`EngineError::NotFound`] since, at this level, they all mean the
//! execution service referenced an id the session does not know about.

use stepviz_core::CoreError;

use crate::control::StepState;

/// Errors produced by the stepviz-engine crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// An event referenced an id absent from the current graph.
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// A known event had missing or inconsistent fields. Nothing was applied.
    #[error("malformed '{action}' event: {reason}")]
    MalformedEvent { action: String, reason: String },

    /// A stepping command is not allowed in the current state.
    #[error("cannot {command} while {state}")]
    InvalidTransition {
        command: &'static str,
        state: StepState,
    },

    /// A command was issued before the initial render handshake.
    #[error("session has not completed its initial render")]
    NotInitialized,

    /// A graph supplied by the execution service violates graph invariants.
    #[error("invalid graph: {0}")]
    InvalidGraph(CoreError),
}

impl EngineError {
    pub(crate) fn malformed(action: &str, reason: impl Into<String>) -> Self {
        EngineError::MalformedEvent {
            action: action.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ElementNotFound { id } => EngineError::NotFound { kind: "element", id },
            CoreError::NodeNotFound { id } => EngineError::NotFound { kind: "node", id },
            CoreError::EdgeNotFound { id } => EngineError::NotFound { kind: "edge", id },
            CoreError::NotAVariable { .. } => EngineError::malformed("setDomains", err.to_string()),
            CoreError::DuplicateId { .. }
            | CoreError::DanglingEdge { .. }
            | CoreError::InvalidJson { .. }
            | CoreError::EncodeJson { .. } => EngineError::InvalidGraph(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_failures_become_not_found() {
        let err = EngineError::from(CoreError::EdgeNotFound { id: "e9".into() });
        assert_eq!(
            err,
            EngineError::NotFound {
                kind: "edge",
                id: "e9".into()
            }
        );
        assert_eq!(err.to_string(), "edge not found: 'e9'");
    }

    #[test]
    fn structural_failures_become_invalid_graph() {
        let err = EngineError::from(CoreError::DuplicateId { id: "x".into() });
        assert!(matches!(err, EngineError::InvalidGraph(_)));
    }
}
