//! Node storage.
//!
//! Nodes live in one table per node type, keyed by id so that scans come
//! out in ascending id order without sorting.

use std::collections::{BTreeMap, BTreeSet};

use kindred_core::{NodeId, NodeType, Properties, ID_PROPERTY};

/// How a node's id was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Handed out by the identity allocator on upsert.
    Allocated,
    /// Supplied by the caller through `save`.
    Supplied,
}

#[derive(Debug, Clone)]
struct NodeSlot {
    properties: Properties,
    origin: Origin,
}

#[derive(Debug, Default, Clone)]
struct NodeTable {
    rows: BTreeMap<NodeId, NodeSlot>,
    /// Ids deleted during this store lifetime.
    retired: BTreeSet<NodeId>,
}

/// Node storage operations.
///
/// `NodeStore` owns the property record of every live node. It does not
/// know about relationships; the graph engine resolves those before it
/// removes a node from here.
#[derive(Debug, Default, Clone)]
pub struct NodeStore {
    tables: BTreeMap<NodeType, NodeTable>,
}

impl NodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node under `id`, overwriting any live record with that id.
    ///
    /// The `id` property of the stored record is set to `id`.
    pub fn insert(
        &mut self,
        node_type: &NodeType,
        id: NodeId,
        mut properties: Properties,
        origin: Origin,
    ) {
        properties.insert(ID_PROPERTY.to_owned(), id.into());
        let table = self.tables.entry(node_type.clone()).or_default();
        table.rows.insert(id, NodeSlot { properties, origin });
    }

    /// Replace a live node's record wholesale, keeping its origin.
    ///
    /// Returns `false` if no such node exists.
    pub fn replace(&mut self, node_type: &str, id: NodeId, mut properties: Properties) -> bool {
        let Some(slot) = self.tables.get_mut(node_type).and_then(|t| t.rows.get_mut(&id)) else {
            return false;
        };
        properties.insert(ID_PROPERTY.to_owned(), id.into());
        slot.properties = properties;
        true
    }

    /// Get a node's record.
    #[must_use]
    pub fn get(&self, node_type: &str, id: NodeId) -> Option<&Properties> {
        self.tables.get(node_type)?.rows.get(&id).map(|slot| &slot.properties)
    }

    /// How a live node's id was chosen.
    #[must_use]
    pub fn origin(&self, node_type: &str, id: NodeId) -> Option<Origin> {
        self.tables.get(node_type)?.rows.get(&id).map(|slot| slot.origin)
    }

    /// Check if a node exists.
    #[must_use]
    pub fn contains(&self, node_type: &str, id: NodeId) -> bool {
        self.tables.get(node_type).is_some_and(|t| t.rows.contains_key(&id))
    }

    /// Returns `true` if `id` belonged to a node that has since been deleted.
    #[must_use]
    pub fn is_retired(&self, node_type: &str, id: NodeId) -> bool {
        self.tables.get(node_type).is_some_and(|t| t.retired.contains(&id))
    }

    /// Remove a node and retire its id.
    ///
    /// Returns the removed record, or `None` if the node did not exist.
    pub fn remove(&mut self, node_type: &str, id: NodeId) -> Option<Properties> {
        let table = self.tables.get_mut(node_type)?;
        let slot = table.rows.remove(&id)?;
        table.retired.insert(id);
        Some(slot.properties)
    }

    /// Snapshot of every record of `node_type`, ordered by ascending id.
    #[must_use]
    pub fn scan(&self, node_type: &str) -> Vec<Properties> {
        self.rows(node_type).map(|(_, props)| props.clone()).collect()
    }

    /// Snapshot of every record of `node_type`, keyed by id.
    #[must_use]
    pub fn scan_navigable(&self, node_type: &str) -> BTreeMap<NodeId, Properties> {
        self.rows(node_type).map(|(id, props)| (id, props.clone())).collect()
    }

    /// Borrowing iterator over the live records of one type, ascending by id.
    pub fn rows(&self, node_type: &str) -> impl Iterator<Item = (NodeId, &Properties)> + '_ {
        self.tables
            .get(node_type)
            .into_iter()
            .flat_map(|t| t.rows.iter().map(|(id, slot)| (*id, &slot.properties)))
    }

    /// Borrowing iterator over every live node, ordered by type then id.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeType, NodeId, &Properties)> + '_ {
        self.tables.iter().flat_map(|(node_type, t)| {
            t.rows.iter().map(move |(id, slot)| (node_type, *id, &slot.properties))
        })
    }

    /// Number of live nodes of `node_type`.
    #[must_use]
    pub fn count(&self, node_type: &str) -> usize {
        self.tables.get(node_type).map_or(0, |t| t.rows.len())
    }

    /// Number of live nodes across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.values().map(|t| t.rows.len()).sum()
    }

    /// Returns `true` if there are no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node types with at least one live node, in order.
    #[must_use]
    pub fn node_types(&self) -> Vec<NodeType> {
        self.tables
            .iter()
            .filter(|(_, t)| !t.rows.is_empty())
            .map(|(node_type, _)| node_type.clone())
            .collect()
    }

    /// Drop every node and forget retired ids.
    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use kindred_core::Value;

    use super::*;

    fn props(name: &str) -> Properties {
        let mut p = Properties::new();
        p.insert("name".to_owned(), Value::from(name));
        p
    }

    #[test]
    fn insert_writes_id_property() {
        let mut store = NodeStore::new();
        store.insert(&"place".into(), NodeId::new(4), props("York"), Origin::Allocated);

        let record = store.get("place", NodeId::new(4)).unwrap();
        assert_eq!(record.get(ID_PROPERTY), Some(&Value::Int(4)));
        assert_eq!(record.get("name"), Some(&Value::from("York")));
    }

    #[test]
    fn replace_keeps_origin_and_drops_old_keys() {
        let mut store = NodeStore::new();
        let mut first = props("York");
        first.insert("county".to_owned(), Value::from("Yorkshire"));
        store.insert(&"place".into(), NodeId::new(1), first, Origin::Supplied);

        assert!(store.replace("place", NodeId::new(1), props("Jorvik")));
        let record = store.get("place", NodeId::new(1)).unwrap();
        assert_eq!(record.get("county"), None);
        assert_eq!(store.origin("place", NodeId::new(1)), Some(Origin::Supplied));
        assert!(!store.replace("place", NodeId::new(2), props("Leeds")));
    }

    #[test]
    fn remove_retires_id() {
        let mut store = NodeStore::new();
        store.insert(&"place".into(), NodeId::new(1), props("York"), Origin::Allocated);
        assert!(store.remove("place", NodeId::new(1)).is_some());
        assert!(store.remove("place", NodeId::new(1)).is_none());
        assert!(store.is_retired("place", NodeId::new(1)));
        assert!(!store.contains("place", NodeId::new(1)));
        assert!(store.node_types().is_empty());
    }

    #[test]
    fn scan_is_ordered_by_id() {
        let mut store = NodeStore::new();
        for id in [5, 2, 9] {
            store.insert(&"person".into(), NodeId::new(id), Properties::new(), Origin::Supplied);
        }
        let ids: Vec<_> =
            store.scan("person").iter().map(|p| p[ID_PROPERTY].as_int().unwrap()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
        assert_eq!(store.scan_navigable("person").keys().next(), Some(&NodeId::new(2)));
        assert!(store.scan("nobody").is_empty());
    }
}
