//! Relationship (edge) storage.
//!
//! Relationships are keyed by their identifying tuple
//! `(rel_type, source, target)`. Every insert and removal goes through
//! this module so that the relationship table and the
//! [`AdjacencyIndex`] always change together.

use std::collections::BTreeMap;

use kindred_core::{NodeRef, NodeType, RelType, Relationship, RelationshipKey};

use crate::index::AdjacencyIndex;

/// Relationship storage operations.
#[derive(Debug, Default, Clone)]
pub struct RelationshipStore {
    edges: BTreeMap<RelationshipKey, Relationship>,
    index: AdjacencyIndex,
}

impl RelationshipStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a relationship.
    ///
    /// A relationship with the same key has its properties and policy
    /// replaced. Returns the previous relationship, if any.
    pub fn upsert(&mut self, relationship: Relationship) -> Option<Relationship> {
        let key = relationship.key.clone();
        let previous = self.edges.insert(key.clone(), relationship);
        if previous.is_none() {
            self.index.add(&key);
        }
        previous
    }

    /// Get a relationship by key.
    #[must_use]
    pub fn get(&self, key: &RelationshipKey) -> Option<&Relationship> {
        self.edges.get(key)
    }

    /// Remove a relationship. Its endpoints are untouched.
    pub fn remove(&mut self, key: &RelationshipKey) -> Option<Relationship> {
        let removed = self.edges.remove(key)?;
        self.index.remove(key);
        Some(removed)
    }

    /// Keys of every relationship touching `node`, as source or target.
    ///
    /// A relationship from `node` to itself appears once.
    #[must_use]
    pub fn incident_keys(&self, node: &NodeRef) -> Vec<RelationshipKey> {
        let mut keys: Vec<RelationshipKey> = self.index.outgoing(node).cloned().collect();
        keys.extend(self.index.incoming(node).filter(|key| &key.source != node).cloned());
        keys
    }

    /// Remove every relationship touching `node`. The node itself and the
    /// nodes at the other ends are untouched.
    pub fn remove_all_incident_to(&mut self, node: &NodeRef) -> Vec<Relationship> {
        self.incident_keys(node).iter().filter_map(|key| self.remove(key)).collect()
    }

    /// Relationships leaving `source`, ordered by key.
    pub fn outgoing(&self, source: &NodeRef) -> impl Iterator<Item = &Relationship> + '_ {
        self.index.outgoing(source).filter_map(move |key| self.edges.get(key))
    }

    /// Relationships arriving at `target`, ordered by key.
    pub fn incoming(&self, target: &NodeRef) -> impl Iterator<Item = &Relationship> + '_ {
        self.index.incoming(target).filter_map(move |key| self.edges.get(key))
    }

    /// Keys of one type leaving `source`, ordered by target.
    pub fn outgoing_by_type<'a>(
        &'a self,
        source: &NodeRef,
        rel_type: &'a RelType,
    ) -> impl Iterator<Item = &'a RelationshipKey> + 'a {
        self.index.outgoing_by_type(source, rel_type)
    }

    /// Keys of one type arriving at `target` from nodes of `source_type`,
    /// ordered by source id.
    pub fn incoming_by_type<'a>(
        &'a self,
        target: &NodeRef,
        rel_type: &RelType,
        source_type: &NodeType,
    ) -> impl Iterator<Item = &'a RelationshipKey> + 'a {
        self.index.incoming_by_type(target, rel_type, source_type)
    }

    /// Every relationship, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.edges.values()
    }

    /// Number of relationships.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if there are no relationships.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Read access to the adjacency index.
    #[must_use]
    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    /// Drop every relationship and index entry.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.index.clear();
    }
}
