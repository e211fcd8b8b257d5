//! Error types for `Kindred`.

use thiserror::Error;

/// Errors that can occur when using a [`GraphStore`](crate::GraphStore).
///
/// Each error is local to the call that produced it; the store is left as
/// it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Config(String),

    /// A graph operation was rejected.
    #[error(transparent)]
    Graph(#[from] kindred_graph::GraphError),

    /// A typed record could not be converted.
    #[error("schema error: {0}")]
    Schema(#[from] kindred_core::CoreError),
}

impl Error {
    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns `true` if a relationship referenced a node that does not exist.
    #[must_use]
    pub const fn is_dangling_endpoint(&self) -> bool {
        matches!(self, Self::Graph(kindred_graph::GraphError::DanglingEndpoint(_)))
    }

    /// Returns `true` if a supplied id collided with an existing or retired one.
    #[must_use]
    pub const fn is_duplicate_identity(&self) -> bool {
        matches!(self, Self::Graph(kindred_graph::GraphError::DuplicateIdentity(_)))
    }
}

/// A specialized `Result` type for `Kindred` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use kindred_core::NodeRef;
    use kindred_graph::GraphError;

    use super::*;

    #[test]
    fn graph_errors_display_transparently() {
        let err: Error = GraphError::DanglingEndpoint(NodeRef::new("citation", 3u64)).into();
        assert_eq!(err.to_string(), "relationship endpoint does not exist: citation#3");
        assert!(err.is_dangling_endpoint());
        assert!(!err.is_duplicate_identity());
    }

    #[test]
    fn config_error_display() {
        assert_eq!(Error::config("empty name").to_string(), "configuration error: empty name");
    }
}
