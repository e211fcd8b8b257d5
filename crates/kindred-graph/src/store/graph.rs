//! The graph engine: mutation and query entry points over one store.
//!
//! [`Graph`] bundles the identity allocator, node store and relationship
//! store and is the only place that touches more than one of them. Every
//! mutation validates its inputs before it writes anything, so a call that
//! returns an error leaves the graph exactly as it was.

use std::collections::BTreeMap;

use kindred_core::schema::record_id;
use kindred_core::{
    DeletePolicy, NodeId, NodeRef, NodeType, Properties, RelType, Relationship, RelationshipKey,
    Value, ID_PROPERTY,
};
use tracing::{debug, warn};

use super::cascade::{self, CascadeOutcome};
use super::error::{GraphError, GraphResult};
use super::id_gen::IdAllocator;
use super::node::{NodeStore, Origin};
use super::relationship::RelationshipStore;

/// How many outgoing relationships of one type a node may hold.
///
/// Forward navigation ([`Graph::find_referenced_node`]) returns a single
/// node, so a node with several outgoing edges of the navigated type needs
/// a rule for which one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FanOut {
    /// Any number is allowed; navigation returns the target that sorts
    /// lowest by `(node_type, id)`.
    #[default]
    LowestTarget,
    /// At most one target per `(source, rel_type)`; a second distinct
    /// target is rejected when the relationship is created.
    Forbid,
}

/// A node-property equality filter for reverse lookups.
#[derive(Debug, Clone, Copy)]
pub struct PropertyFilter<'a> {
    /// Property key on the referencing node.
    pub key: &'a str,
    /// Required value.
    pub value: &'a Value,
}

impl<'a> PropertyFilter<'a> {
    /// Create a filter matching nodes whose `key` equals `value`.
    #[must_use]
    pub const fn new(key: &'a str, value: &'a Value) -> Self {
        Self { key, value }
    }

    fn matches(&self, properties: &Properties) -> bool {
        properties.get(self.key) == Some(self.value)
    }
}

/// In-memory graph of typed nodes and relationships.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    ids: IdAllocator,
    nodes: NodeStore,
    relationships: RelationshipStore,
    fan_out: FanOut,
}

impl Graph {
    /// Create an empty graph with the default fan-out rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given fan-out rule.
    #[must_use]
    pub fn with_fan_out(fan_out: FanOut) -> Self {
        Self { fan_out, ..Self::default() }
    }

    /// The fan-out rule in effect.
    #[must_use]
    pub const fn fan_out(&self) -> FanOut {
        self.fan_out
    }

    // ---- mutation ----

    /// Insert or replace a node.
    ///
    /// If `properties` carries an `id` matching a live node of `node_type`,
    /// that node's record is replaced wholesale. Otherwise a fresh id is
    /// allocated and any incoming `id` is overwritten with it.
    pub fn upsert(&mut self, node_type: impl Into<NodeType>, properties: Properties) -> NodeId {
        let node_type = node_type.into();

        if let Some(id) = record_id(&properties) {
            if self.nodes.contains(node_type.as_str(), id) {
                self.nodes.replace(node_type.as_str(), id, properties);
                debug!(node_type = %node_type, id = %id, "replaced node");
                return id;
            }
        }

        let id = self.ids.next_id(&node_type);
        self.nodes.insert(&node_type, id, properties, Origin::Allocated);
        debug!(node_type = %node_type, id = %id, "inserted node");
        id
    }

    /// Insert or overwrite a node under the id carried in `properties`.
    ///
    /// Used for deterministic bulk loads. The allocator for `node_type` is
    /// advanced past the supplied id so later upserts never collide with it.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidIdentity`] if `id` is missing, not a positive
    ///   integer, or equal to `i64::MAX`.
    /// - [`GraphError::DuplicateIdentity`] if the id belongs to a node created
    ///   by [`Self::upsert`], or to a node deleted earlier in this store's lifetime.
    pub fn save(
        &mut self,
        node_type: impl Into<NodeType>,
        properties: Properties,
    ) -> GraphResult<NodeId> {
        let node_type = node_type.into();
        let raw = properties.get(ID_PROPERTY).cloned().unwrap_or(Value::Null);
        // The largest id is left to the allocator so the counter stays in range.
        let Some(id) = NodeId::from_value(&raw).filter(|id| *id < NodeId::MAX) else {
            return Err(GraphError::InvalidIdentity { node_type, value: raw });
        };

        match self.nodes.origin(node_type.as_str(), id) {
            Some(Origin::Supplied) => {
                self.nodes.replace(node_type.as_str(), id, properties);
                debug!(node_type = %node_type, id = %id, "overwrote saved node");
            }
            Some(Origin::Allocated) => {
                return Err(GraphError::DuplicateIdentity(NodeRef::new(node_type, id)));
            }
            None if self.nodes.is_retired(node_type.as_str(), id) => {
                return Err(GraphError::DuplicateIdentity(NodeRef::new(node_type, id)));
            }
            None => {
                self.ids.advance_past(&node_type, id);
                self.nodes.insert(&node_type, id, properties, Origin::Supplied);
                debug!(node_type = %node_type, id = %id, "saved node");
            }
        }
        Ok(id)
    }

    /// Delete a node, resolving every relationship incident to it first.
    ///
    /// Relationships whose policy for the deleted side is cascade take the
    /// node at their other end with them, transitively. Deleting a node that
    /// does not exist is a no-op and returns an empty outcome.
    pub fn delete(&mut self, node_type: &str, id: NodeId) -> CascadeOutcome {
        let root = NodeRef::new(node_type, id);
        let outcome = cascade::delete_node(&mut self.nodes, &mut self.relationships, &root);
        if !outcome.is_empty() {
            debug!(
                root = %root,
                nodes_removed = outcome.nodes.len(),
                relationships_removed = outcome.relationships.len(),
                "deleted node"
            );
        }
        outcome
    }

    /// Create or replace the relationship `source --rel_type--> target`.
    ///
    /// A second call with the same `(rel_type, source, target)` replaces the
    /// properties and the delete policy.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DanglingEndpoint`] if either endpoint does not exist.
    /// - [`GraphError::AmbiguousForwardEdge`] under [`FanOut::Forbid`] if
    ///   `source` already has a `rel_type` relationship to another node.
    pub fn upsert_relationship(
        &mut self,
        rel_type: impl Into<RelType>,
        source: NodeRef,
        target: NodeRef,
        properties: Properties,
        policy: DeletePolicy,
    ) -> GraphResult<()> {
        for endpoint in [&source, &target] {
            if !self.exists(endpoint.node_type.as_str(), endpoint.id) {
                return Err(GraphError::DanglingEndpoint(endpoint.clone()));
            }
        }

        let key = RelationshipKey::new(rel_type, source, target);
        if self.fan_out == FanOut::Forbid {
            let existing = self
                .relationships
                .outgoing_by_type(&key.source, &key.rel_type)
                .find(|existing| existing.target != key.target);
            if let Some(existing) = existing {
                return Err(GraphError::AmbiguousForwardEdge {
                    rel_type: key.rel_type.clone(),
                    node: key.source.clone(),
                    existing: existing.target.clone(),
                });
            }
        }

        debug!(relationship = %key, ?policy, "upserted relationship");
        self.relationships.upsert(Relationship { key, properties, policy });
        Ok(())
    }

    /// Remove one relationship. Its endpoints are untouched.
    pub fn remove_relationship(&mut self, key: &RelationshipKey) -> Option<Relationship> {
        let removed = self.relationships.remove(key);
        if removed.is_some() {
            debug!(relationship = %key, "removed relationship");
        }
        removed
    }

    /// Remove every relationship touching a node, without deleting any node.
    pub fn remove_all_incident_to(&mut self, node_type: &str, id: NodeId) -> Vec<Relationship> {
        let node = NodeRef::new(node_type, id);
        let removed = self.relationships.remove_all_incident_to(&node);
        debug!(node = %node, count = removed.len(), "removed incident relationships");
        removed
    }

    /// Empty every table and index and reset all identity counters.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.relationships.clear();
        self.ids.reset();
    }

    // ---- query ----

    /// Get a node's record.
    #[must_use]
    pub fn get(&self, node_type: &str, id: NodeId) -> Option<&Properties> {
        self.nodes.get(node_type, id)
    }

    /// Check if a node exists.
    #[must_use]
    pub fn exists(&self, node_type: &str, id: NodeId) -> bool {
        self.nodes.contains(node_type, id)
    }

    /// Number of live nodes of `node_type`.
    #[must_use]
    pub fn count(&self, node_type: &str) -> usize {
        self.nodes.count(node_type)
    }

    /// Node types with at least one live node, in order.
    #[must_use]
    pub fn node_types(&self) -> Vec<NodeType> {
        self.nodes.node_types()
    }

    /// Every record of `node_type`, ordered by ascending id.
    #[must_use]
    pub fn scan_all(&self, node_type: &str) -> Vec<Properties> {
        self.nodes.scan(node_type)
    }

    /// Every record of `node_type`, keyed by id for lookup and ordered
    /// iteration in the same pass.
    #[must_use]
    pub fn scan_all_navigable(&self, node_type: &str) -> BTreeMap<NodeId, Properties> {
        self.nodes.scan_navigable(node_type)
    }

    /// The node that `(node_type, id)` references through `rel_type`.
    ///
    /// When several relationships match, the target that sorts lowest by
    /// `(node_type, id)` is returned.
    #[must_use]
    pub fn find_referenced_node(
        &self,
        node_type: &str,
        id: NodeId,
        rel_type: &str,
    ) -> Option<(NodeType, Properties)> {
        let source = NodeRef::new(node_type, id);
        let rel_type = RelType::new(rel_type);
        let mut keys = self.relationships.outgoing_by_type(&source, &rel_type);
        let first = keys.next()?;
        if keys.next().is_some() {
            warn!(
                node = %source,
                rel_type = %rel_type,
                chosen = %first.target,
                "several forward relationships; using the lowest target"
            );
        }
        self.record_of(&first.target).map(|props| (first.target.node_type.clone(), props))
    }

    /// Every node that `(node_type, id)` references through `rel_type`,
    /// ordered by `(node_type, id)`.
    #[must_use]
    pub fn find_referenced_nodes(
        &self,
        node_type: &str,
        id: NodeId,
        rel_type: &str,
    ) -> Vec<(NodeType, Properties)> {
        let source = NodeRef::new(node_type, id);
        let rel_type = RelType::new(rel_type);
        self.relationships
            .outgoing_by_type(&source, &rel_type)
            .filter_map(|key| {
                self.record_of(&key.target).map(|props| (key.target.node_type.clone(), props))
            })
            .collect()
    }

    /// Every node of `referencing_type` holding a `rel_type` relationship
    /// to `referenced`, ordered by id.
    ///
    /// With a filter, only nodes whose own property matches are returned.
    #[must_use]
    pub fn find_referencing_nodes(
        &self,
        referencing_type: &str,
        referenced: &NodeRef,
        rel_type: &str,
        filter: Option<PropertyFilter<'_>>,
    ) -> Vec<Properties> {
        let rel_type = RelType::new(rel_type);
        let source_type = NodeType::new(referencing_type);
        self.relationships
            .incoming_by_type(referenced, &rel_type, &source_type)
            .filter_map(|key| self.nodes.get(key.source.node_type.as_str(), key.source.id))
            .filter(|props| filter.map_or(true, |f| f.matches(props)))
            .cloned()
            .collect()
    }

    /// Get a relationship by key.
    #[must_use]
    pub fn get_relationship(&self, key: &RelationshipKey) -> Option<&Relationship> {
        self.relationships.get(key)
    }

    /// Relationships leaving a node, ordered by key.
    #[must_use]
    pub fn relationships_from(&self, node: &NodeRef) -> Vec<&Relationship> {
        self.relationships.outgoing(node).collect()
    }

    /// Relationships arriving at a node, ordered by key.
    #[must_use]
    pub fn relationships_to(&self, node: &NodeRef) -> Vec<&Relationship> {
        self.relationships.incoming(node).collect()
    }

    /// Every relationship, ordered by key.
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.relationships.iter()
    }

    /// Number of relationships.
    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Every live node, ordered by type then id.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeType, NodeId, &Properties)> + '_ {
        self.nodes.iter()
    }

    fn record_of(&self, node: &NodeRef) -> Option<Properties> {
        self.nodes.get(node.node_type.as_str(), node.id).cloned()
    }
}
