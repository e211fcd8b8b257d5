//! Error types for graph storage operations.

use kindred_core::{NodeRef, NodeType, RelType, Value};
use thiserror::Error;

/// Errors that can occur in graph storage operations.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A relationship endpoint does not exist.
    #[error("relationship endpoint does not exist: {0}")]
    DanglingEndpoint(NodeRef),

    /// A caller-supplied id collides with one the allocator produced.
    #[error("identity already taken: {0}")]
    DuplicateIdentity(NodeRef),

    /// A record passed to `save` carries no usable id.
    #[error("invalid identity for {node_type}: {value}")]
    InvalidIdentity {
        /// The node type being saved.
        node_type: NodeType,
        /// The offending `id` value (`null` when absent).
        value: Value,
    },

    /// A second outgoing relationship of one type was rejected by
    /// [`FanOut::Forbid`](crate::FanOut::Forbid).
    #[error("{node} already has a {rel_type} relationship to {existing}")]
    AmbiguousForwardEdge {
        /// The relationship type.
        rel_type: RelType,
        /// The source node.
        node: NodeRef,
        /// The target it already points at.
        existing: NodeRef,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
