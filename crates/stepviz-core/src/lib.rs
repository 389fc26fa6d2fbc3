pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod json;
pub mod node;
pub mod overlay;
pub mod projector;
pub mod style;

// Re-export commonly used types
pub use edge::VizEdge;
pub use error::CoreError;
pub use graph::{Element, ElementKind, VizGraph};
pub use id::{EdgeId, NodeId};
pub use json::GraphJson;
pub use node::{Domain, DomainValue, NodeKind, VizNode};
pub use overlay::Targets;
pub use style::{Style, StyleChange, StyleValue};
