//! Cascade delete resolution.
//!
//! Deleting a node walks every relationship incident to it. Each
//! relationship is removed, and when the policy for the deleted side is
//! [`OnDelete::Cascade`](kindred_core::OnDelete::Cascade) the node at the
//! other end is queued for deletion as well. A visited set makes the walk
//! terminate on cyclic graphs.
//!
//! The walk uses an explicit stack rather than recursion so that long
//! cascade chains cannot overflow the call stack.

use std::collections::BTreeSet;

use kindred_core::{NodeRef, Properties, Relationship};
use tracing::trace;

use super::node::NodeStore;
use super::relationship::RelationshipStore;

/// Everything a single delete removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CascadeOutcome {
    /// Removed nodes with their last record, in removal order.
    pub nodes: Vec<(NodeRef, Properties)>,
    /// Removed relationships, in removal order.
    pub relationships: Vec<Relationship>,
}

impl CascadeOutcome {
    /// Returns `true` if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    /// Returns `true` if `node` was removed.
    #[must_use]
    pub fn removed(&self, node: &NodeRef) -> bool {
        self.nodes.iter().any(|(n, _)| n == node)
    }
}

/// Delete `root` and everything its cascade policies reach.
///
/// Does nothing if `root` does not exist.
pub(crate) fn delete_node(
    nodes: &mut NodeStore,
    relationships: &mut RelationshipStore,
    root: &NodeRef,
) -> CascadeOutcome {
    let mut outcome = CascadeOutcome::default();
    if !nodes.contains(root.node_type.as_str(), root.id) {
        return outcome;
    }

    let mut visited = BTreeSet::from([root.clone()]);
    let mut pending = vec![root.clone()];

    while let Some(node) = pending.pop() {
        trace!(node = %node, "resolving incident relationships");

        for relationship in relationships.remove_all_incident_to(&node) {
            let cascades =
                relationship.policy_when_deleting(&node).is_some_and(|policy| policy.cascades());
            if cascades {
                if let Some(other) = relationship.key.other_end(&node) {
                    if visited.insert(other.clone()) {
                        pending.push(other.clone());
                    }
                }
            }
            outcome.relationships.push(relationship);
        }

        let removed = nodes.remove(node.node_type.as_str(), node.id);
        debug_assert!(removed.is_some(), "cascade reached {node} twice");
        if let Some(properties) = removed {
            outcome.nodes.push((node, properties));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use kindred_core::{DeletePolicy, NodeId, NodeType, OnDelete, RelationshipKey};

    use super::*;
    use crate::store::node::Origin;

    fn node(nodes: &mut NodeStore, node_type: &str, id: u64) -> NodeRef {
        let node_type = NodeType::new(node_type);
        nodes.insert(&node_type, NodeId::new(id), Properties::new(), Origin::Supplied);
        NodeRef::new(node_type, id)
    }

    fn link(
        relationships: &mut RelationshipStore,
        source: &NodeRef,
        target: &NodeRef,
        policy: DeletePolicy,
    ) {
        let key = RelationshipKey::new("LINK", source.clone(), target.clone());
        relationships.upsert(Relationship::new(key, policy));
    }

    #[test]
    fn missing_root_is_a_no_op() {
        let mut nodes = NodeStore::new();
        let mut relationships = RelationshipStore::new();
        let outcome = delete_node(&mut nodes, &mut relationships, &NodeRef::new("x", 1u64));
        assert!(outcome.is_empty());
    }

    #[test]
    fn mutual_cascade_cycle_terminates() {
        let mut nodes = NodeStore::new();
        let mut relationships = RelationshipStore::new();
        let a = node(&mut nodes, "n", 1);
        let b = node(&mut nodes, "n", 2);
        let c = node(&mut nodes, "n", 3);
        link(&mut relationships, &a, &b, DeletePolicy::CASCADE_BOTH);
        link(&mut relationships, &b, &c, DeletePolicy::CASCADE_BOTH);
        link(&mut relationships, &c, &a, DeletePolicy::CASCADE_BOTH);

        let outcome = delete_node(&mut nodes, &mut relationships, &a);
        assert_eq!(outcome.nodes.len(), 3);
        assert_eq!(outcome.relationships.len(), 3);
        assert!(nodes.is_empty());
        assert!(relationships.is_empty());
    }

    #[test]
    fn self_loop_is_removed_once() {
        let mut nodes = NodeStore::new();
        let mut relationships = RelationshipStore::new();
        let a = node(&mut nodes, "n", 1);
        link(&mut relationships, &a, &a, DeletePolicy::CASCADE_BOTH);

        let outcome = delete_node(&mut nodes, &mut relationships, &a);
        assert_eq!(outcome.nodes.len(), 1);
        assert_eq!(outcome.relationships.len(), 1);
    }

    #[test]
    fn policy_is_chosen_by_deleted_side() {
        let mut nodes = NodeStore::new();
        let mut relationships = RelationshipStore::new();
        let parent = node(&mut nodes, "citation", 1);
        let child = node(&mut nodes, "localized_text", 1);
        // Deleting the child leaves the parent; deleting the parent takes the child.
        let policy = DeletePolicy::default().on_target_deleted(OnDelete::Cascade);
        link(&mut relationships, &child, &parent, policy);

        let outcome = delete_node(&mut nodes, &mut relationships, &child);
        assert!(outcome.removed(&child));
        assert!(!outcome.removed(&parent));
        assert!(nodes.contains("citation", NodeId::new(1)));
    }
}
