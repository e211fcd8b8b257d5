//! Node identities.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeType, Value};

/// Identifier of a node within its node type.
///
/// Ids are allocated per node type starting at 1; 0 is never a valid id.
/// Ids are kept within `i64` range so they can be stored in the `id`
/// property of a record as a [`Value::Int`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// The smallest representable id. Used as a lower range bound only.
    pub const MIN: Self = Self(0);

    /// The largest id that fits in a record's `id` property.
    pub const MAX: Self = Self(i64::MAX as u64);

    /// Create a new `NodeId` from a raw u64 value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns `true` if this id can be assigned to a stored node.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        self.0 >= 1 && self.0 <= Self::MAX.0
    }

    /// Read an id out of a property value.
    ///
    /// Only positive integers are accepted.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) if *i > 0 => u64::try_from(*i).ok().map(Self),
            _ => None,
        }
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Self::Int(i64::try_from(id.0).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully qualified reference to a node: its type plus its id.
///
/// References order by node type first, then id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    /// The node's type.
    pub node_type: NodeType,
    /// The node's id within that type.
    pub id: NodeId,
}

impl NodeRef {
    /// Create a new node reference.
    #[must_use]
    pub fn new(node_type: impl Into<NodeType>, id: impl Into<NodeId>) -> Self {
        Self { node_type: node_type.into(), id: id.into() }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.node_type, self.id)
    }
}
