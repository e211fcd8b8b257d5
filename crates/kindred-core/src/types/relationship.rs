//! Relationship (edge) types for the graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeRef, Properties, RelType, Value};

/// What happens at the far end of a relationship when one endpoint is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OnDelete {
    /// Remove just the relationship; the node at the other end is left untouched.
    #[default]
    RelationshipOnly,
    /// Remove the relationship and recursively delete the node at the other end.
    Cascade,
}

impl OnDelete {
    /// Returns `true` for [`OnDelete::Cascade`].
    #[must_use]
    pub const fn cascades(self) -> bool {
        matches!(self, Self::Cascade)
    }

    /// Stable upper-case name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RelationshipOnly => "RELATIONSHIP_ONLY",
            Self::Cascade => "CASCADE",
        }
    }
}

impl fmt::Display for OnDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of delete policies carried by every relationship.
///
/// Each side is named so that the two cannot be transposed by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeletePolicy {
    /// Applied when the source node is deleted; a cascade deletes the target.
    pub on_source_deleted: OnDelete,
    /// Applied when the target node is deleted; a cascade deletes the source.
    pub on_target_deleted: OnDelete,
}

impl DeletePolicy {
    /// Neither side cascades.
    pub const RELATIONSHIP_ONLY: Self = Self {
        on_source_deleted: OnDelete::RelationshipOnly,
        on_target_deleted: OnDelete::RelationshipOnly,
    };

    /// Both sides cascade: deleting either endpoint deletes the other.
    pub const CASCADE_BOTH: Self =
        Self { on_source_deleted: OnDelete::Cascade, on_target_deleted: OnDelete::Cascade };

    /// Set the policy applied when the source is deleted.
    #[must_use]
    pub const fn on_source_deleted(mut self, policy: OnDelete) -> Self {
        self.on_source_deleted = policy;
        self
    }

    /// Set the policy applied when the target is deleted.
    #[must_use]
    pub const fn on_target_deleted(mut self, policy: OnDelete) -> Self {
        self.on_target_deleted = policy;
        self
    }
}

/// The identifying tuple of a relationship.
///
/// Keys order by relationship type, then source, then target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationshipKey {
    /// The relationship type.
    pub rel_type: RelType,
    /// The source endpoint.
    pub source: NodeRef,
    /// The target endpoint.
    pub target: NodeRef,
}

impl RelationshipKey {
    /// Create a new relationship key.
    #[must_use]
    pub fn new(rel_type: impl Into<RelType>, source: NodeRef, target: NodeRef) -> Self {
        Self { rel_type: rel_type.into(), source, target }
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    #[must_use]
    pub fn other_end(&self, node: &NodeRef) -> Option<&NodeRef> {
        if &self.source == node {
            Some(&self.target)
        } else if &self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.rel_type, self.source, self.target)
    }
}

/// A directed, typed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// The identifying tuple.
    pub key: RelationshipKey,
    /// Properties stored on this relationship, disjoint from either endpoint's.
    pub properties: Properties,
    /// Delete policy for each endpoint.
    pub policy: DeletePolicy,
}

impl Relationship {
    /// Create a relationship with no properties.
    #[must_use]
    pub fn new(key: RelationshipKey, policy: DeletePolicy) -> Self {
        Self { key, properties: Properties::new(), policy }
    }

    /// Add a property to this relationship.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property value by key.
    #[inline]
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The policy that applies when `node` is the endpoint being deleted.
    ///
    /// When a relationship loops back to the same node both sides match and
    /// the source policy wins; the far end is the node itself either way.
    #[must_use]
    pub fn policy_when_deleting(&self, node: &NodeRef) -> Option<OnDelete> {
        if &self.key.source == node {
            Some(self.policy.on_source_deleted)
        } else if &self.key.target == node {
            Some(self.policy.on_target_deleted)
        } else {
            None
        }
    }
}
