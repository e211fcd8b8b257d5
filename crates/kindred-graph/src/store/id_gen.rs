//! Identity allocation for nodes.
//!
//! Each node type has its own counter. Counters only move forward: a
//! deleted id is never handed out again for the lifetime of the store.

use std::collections::BTreeMap;

use kindred_core::{NodeId, NodeType};

/// A per-node-type monotonic ID allocator.
///
/// IDs start from 1 (0 is reserved for "no ID").
///
/// # Example
///
/// ```
/// use kindred_graph::store::IdAllocator;
///
/// let mut ids = IdAllocator::new();
/// let a = ids.next_id(&"person".into());
/// let b = ids.next_id(&"person".into());
/// assert!(a < b);
/// assert_eq!(ids.next_id(&"place".into()).as_u64(), 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct IdAllocator {
    /// The next id to assign, per node type. Absent means 1.
    next: BTreeMap<NodeType, u64>,
}

impl IdAllocator {
    /// Create an allocator with every counter at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `node_type`.
    ///
    /// Handing out an id past [`NodeId::MAX`] is a logic error.
    pub fn next_id(&mut self, node_type: &NodeType) -> NodeId {
        let next = self.next.entry(node_type.clone()).or_insert(1);
        let id = NodeId::new(*next);
        debug_assert!(id.is_assignable(), "id space exhausted for {node_type}");
        *next = next.saturating_add(1);
        id
    }

    /// Move the counter past an externally supplied id.
    ///
    /// Never moves a counter backwards. Ids that cannot be assigned are
    /// ignored.
    pub fn advance_past(&mut self, node_type: &NodeType, id: NodeId) {
        if !id.is_assignable() {
            return;
        }
        let floor = id.as_u64().saturating_add(1);
        let next = self.next.entry(node_type.clone()).or_insert(1);
        if *next < floor {
            *next = floor;
        }
    }

    /// Reset every counter to its initial state.
    pub fn reset(&mut self) {
        self.next.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> NodeType {
        NodeType::new("person")
    }

    #[test]
    fn new_allocator_starts_at_one() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(&person()).as_u64(), 1);
    }

    #[test]
    fn ids_are_monotonically_increasing() {
        let mut ids = IdAllocator::new();
        let seq: Vec<_> = (0..100).map(|_| ids.next_id(&person()).as_u64()).collect();
        for window in seq.windows(2) {
            assert!(window[0] < window[1]);
        }
    }

    #[test]
    fn node_types_are_independent() {
        let mut ids = IdAllocator::new();
        let place = NodeType::new("place");
        assert_eq!(ids.next_id(&person()).as_u64(), 1);
        assert_eq!(ids.next_id(&person()).as_u64(), 2);
        assert_eq!(ids.next_id(&place).as_u64(), 1);
        assert_eq!(ids.next_id(&person()).as_u64(), 3);
    }

    #[test]
    fn advance_past_never_moves_backwards() {
        let mut ids = IdAllocator::new();
        ids.advance_past(&person(), NodeId::new(10));
        ids.advance_past(&person(), NodeId::new(4));
        assert_eq!(ids.next_id(&person()).as_u64(), 11);
    }

    #[test]
    fn reset_restarts_every_counter() {
        let mut ids = IdAllocator::new();
        ids.next_id(&person());
        ids.next_id(&NodeType::new("place"));
        ids.reset();
        assert_eq!(ids.next_id(&person()).as_u64(), 1);
        assert_eq!(ids.next_id(&NodeType::new("place")).as_u64(), 1);
    }

    #[test]
    fn counter_stays_within_assignable_range() {
        let mut ids = IdAllocator::new();
        ids.advance_past(&person(), NodeId::new(u64::MAX));
        assert_eq!(ids.next_id(&person()).as_u64(), 1);

        ids.advance_past(&person(), NodeId::new(NodeId::MAX.as_u64() - 1));
        let last = ids.next_id(&person());
        assert_eq!(last, NodeId::MAX);
        assert!(last.is_assignable());
    }
}
