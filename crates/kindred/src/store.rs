//! The shared store handle.
//!
//! [`GraphStore`] wraps one [`Graph`] in a single coarse mutex. Every
//! operation takes the lock for its whole duration, so mutations are
//! serialized with each other and with scans, and a scan result is an owned
//! snapshot that later mutations cannot disturb. Use [`GraphStore::with_write`]
//! to run several operations as one atomic step.

use std::collections::BTreeMap;

use kindred_core::{
    DeletePolicy, NodeId, NodeRef, NodeType, Properties, RelType, Relationship, RelationshipKey,
};
use kindred_graph::{CascadeOutcome, Graph, PropertyFilter};
use parking_lot::Mutex;
use tracing::info;

use crate::config::{StoreBuilder, StoreConfig};
use crate::error::Result;

/// The application's graph store.
///
/// `GraphStore` is `Send + Sync`; share it behind an `Arc` when more than one
/// thread needs access.
pub struct GraphStore {
    inner: Mutex<Graph>,
    config: StoreConfig,
}

impl GraphStore {
    /// Create an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Start building a store.
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// Create an empty store with the given configuration.
    ///
    /// The configuration is not validated; use [`StoreBuilder`] for that.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        info!(store = %config.name, fan_out = ?config.fan_out, "opening graph store");
        Self { inner: Mutex::new(Graph::with_fan_out(config.fan_out)), config }
    }

    /// The configuration this store was created with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Run `f` with shared access to the graph under the store lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&*self.inner.lock())
    }

    /// Run `f` with exclusive access to the graph under the store lock.
    ///
    /// Nothing else observes the graph until `f` returns.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut *self.inner.lock())
    }

    // ---- nodes ----

    /// Insert or replace a node, returning its id.
    ///
    /// See [`Graph::upsert`].
    pub fn upsert(&self, node_type: impl Into<NodeType>, properties: Properties) -> NodeId {
        self.inner.lock().upsert(node_type, properties)
    }

    /// Store a record under the id it already carries.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is missing, not positive, or already taken.
    /// See [`Graph::save`].
    pub fn save(&self, node_type: impl Into<NodeType>, properties: Properties) -> Result<NodeId> {
        Ok(self.inner.lock().save(node_type, properties)?)
    }

    /// Delete a node and everything its relationships cascade to.
    pub fn delete(&self, node_type: &str, id: NodeId) -> CascadeOutcome {
        self.inner.lock().delete(node_type, id)
    }

    /// A copy of one node's record.
    #[must_use]
    pub fn get(&self, node_type: &str, id: NodeId) -> Option<Properties> {
        self.inner.lock().get(node_type, id).cloned()
    }

    /// Whether a live node exists.
    #[must_use]
    pub fn exists(&self, node_type: &str, id: NodeId) -> bool {
        self.inner.lock().exists(node_type, id)
    }

    /// Number of live nodes of a type.
    #[must_use]
    pub fn count(&self, node_type: &str) -> usize {
        self.inner.lock().count(node_type)
    }

    /// Node types with at least one live node, sorted.
    #[must_use]
    pub fn node_types(&self) -> Vec<NodeType> {
        self.inner.lock().node_types()
    }

    /// Snapshot of every record of a type, ordered by id.
    #[must_use]
    pub fn scan_all(&self, node_type: &str) -> Vec<Properties> {
        self.inner.lock().scan_all(node_type)
    }

    /// Snapshot of every record of a type, keyed by id.
    #[must_use]
    pub fn scan_all_navigable(&self, node_type: &str) -> BTreeMap<NodeId, Properties> {
        self.inner.lock().scan_all_navigable(node_type)
    }

    // ---- relationships ----

    /// Create or update a relationship.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint does not exist, or if the configured
    /// fan-out rule forbids the relationship.
    pub fn upsert_relationship(
        &self,
        rel_type: impl Into<RelType>,
        source: NodeRef,
        target: NodeRef,
        properties: Properties,
        policy: DeletePolicy,
    ) -> Result<()> {
        Ok(self.inner.lock().upsert_relationship(rel_type, source, target, properties, policy)?)
    }

    /// The node that `(node_type, id)` references through `rel_type`.
    #[must_use]
    pub fn find_referenced_node(
        &self,
        node_type: &str,
        id: NodeId,
        rel_type: &str,
    ) -> Option<(NodeType, Properties)> {
        self.inner.lock().find_referenced_node(node_type, id, rel_type)
    }

    /// Every node that `(node_type, id)` references through `rel_type`.
    #[must_use]
    pub fn find_referenced_nodes(
        &self,
        node_type: &str,
        id: NodeId,
        rel_type: &str,
    ) -> Vec<(NodeType, Properties)> {
        self.inner.lock().find_referenced_nodes(node_type, id, rel_type)
    }

    /// Every node of `referencing_type` pointing at `referenced` through
    /// `rel_type`, optionally filtered on one of its own properties.
    #[must_use]
    pub fn find_referencing_nodes(
        &self,
        referencing_type: &str,
        referenced: &NodeRef,
        rel_type: &str,
        filter: Option<PropertyFilter<'_>>,
    ) -> Vec<Properties> {
        self.inner.lock().find_referencing_nodes(referencing_type, referenced, rel_type, filter)
    }

    /// A copy of one relationship.
    #[must_use]
    pub fn get_relationship(&self, key: &RelationshipKey) -> Option<Relationship> {
        self.inner.lock().get_relationship(key).cloned()
    }

    /// Remove one relationship, leaving its endpoints in place.
    pub fn remove_relationship(&self, key: &RelationshipKey) -> Option<Relationship> {
        self.inner.lock().remove_relationship(key)
    }

    /// Remove every relationship touching a node, leaving all nodes in place.
    pub fn remove_all_incident_to(&self, node_type: &str, id: NodeId) -> Vec<Relationship> {
        self.inner.lock().remove_all_incident_to(node_type, id)
    }

    /// Copies of the relationships leaving a node.
    #[must_use]
    pub fn relationships_from(&self, node: &NodeRef) -> Vec<Relationship> {
        self.inner.lock().relationships_from(node).into_iter().cloned().collect()
    }

    /// Copies of the relationships arriving at a node.
    #[must_use]
    pub fn relationships_to(&self, node: &NodeRef) -> Vec<Relationship> {
        self.inner.lock().relationships_to(node).into_iter().cloned().collect()
    }

    // ---- lifecycle ----

    /// Drop every node and relationship and reset all id counters.
    pub fn clear_database(&self) {
        let mut graph = self.inner.lock();
        let nodes = graph.nodes().count();
        let relationships = graph.relationship_count();
        graph.clear();
        info!(store = %self.config.name, nodes, relationships, "cleared graph store");
    }

    /// Deterministic, human-readable dump of the whole store.
    #[must_use]
    pub fn log_database(&self) -> String {
        self.inner.lock().dump()
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore").field("config", &self.config).finish_non_exhaustive()
    }
}
