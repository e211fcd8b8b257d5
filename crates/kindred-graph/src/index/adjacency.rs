//! Adjacency index for relationship navigation.
//!
//! This module keeps, for every node, the set of relationship keys leaving
//! it (forward) and arriving at it (reverse). The relationship store
//! updates both sides in the same call, so readers never see one side
//! without the other.

use std::collections::{BTreeMap, BTreeSet};

use kindred_core::{NodeId, NodeRef, NodeType, RelType, RelationshipKey};

/// Adjacency index for neighbor lookups in both directions.
///
/// The incoming half is the store's reverse index: it answers "which nodes
/// point at X" without scanning every relationship.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    /// Keys by source node.
    outgoing: BTreeMap<NodeRef, BTreeSet<RelationshipKey>>,
    /// Keys by target node.
    incoming: BTreeMap<NodeRef, BTreeSet<RelationshipKey>>,
}

impl AdjacencyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a relationship under both of its endpoints.
    pub fn add(&mut self, key: &RelationshipKey) {
        self.outgoing.entry(key.source.clone()).or_default().insert(key.clone());
        self.incoming.entry(key.target.clone()).or_default().insert(key.clone());
    }

    /// Remove a relationship from both sides of the index.
    ///
    /// Empty per-node sets are dropped so the index does not grow with
    /// deleted nodes.
    pub fn remove(&mut self, key: &RelationshipKey) {
        Self::remove_from(&mut self.outgoing, &key.source, key);
        Self::remove_from(&mut self.incoming, &key.target, key);
    }

    fn remove_from(
        side: &mut BTreeMap<NodeRef, BTreeSet<RelationshipKey>>,
        anchor: &NodeRef,
        key: &RelationshipKey,
    ) {
        if let Some(set) = side.get_mut(anchor) {
            set.remove(key);
            if set.is_empty() {
                side.remove(anchor);
            }
        }
    }

    /// All keys leaving `source`, ordered.
    pub fn outgoing(&self, source: &NodeRef) -> impl Iterator<Item = &RelationshipKey> + '_ {
        self.outgoing.get(source).into_iter().flatten()
    }

    /// All keys arriving at `target`, ordered.
    pub fn incoming(&self, target: &NodeRef) -> impl Iterator<Item = &RelationshipKey> + '_ {
        self.incoming.get(target).into_iter().flatten()
    }

    /// Keys of one relationship type leaving `source`, ordered by target.
    pub fn outgoing_by_type<'a>(
        &'a self,
        source: &NodeRef,
        rel_type: &'a RelType,
    ) -> impl Iterator<Item = &'a RelationshipKey> + 'a {
        let start = RelationshipKey::new(
            rel_type,
            source.clone(),
            NodeRef::new(NodeType::new(""), NodeId::MIN),
        );
        self.outgoing
            .get(source)
            .into_iter()
            .flat_map(move |set| set.range(start.clone()..))
            .take_while(move |key| &key.rel_type == rel_type)
    }

    /// Keys of one relationship type arriving at `target` from nodes of
    /// `source_type`, ordered by source id.
    pub fn incoming_by_type<'a>(
        &'a self,
        target: &NodeRef,
        rel_type: &RelType,
        source_type: &NodeType,
    ) -> impl Iterator<Item = &'a RelationshipKey> + 'a {
        let low =
            RelationshipKey::new(rel_type, NodeRef::new(source_type, NodeId::MIN), target.clone());
        let high = RelationshipKey::new(
            rel_type,
            NodeRef::new(source_type, NodeId::new(u64::MAX)),
            target.clone(),
        );
        self.incoming
            .get(target)
            .into_iter()
            .flat_map(move |set| set.range(low.clone()..=high.clone()))
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }
}
