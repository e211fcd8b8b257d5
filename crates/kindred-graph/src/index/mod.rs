//! Graph indexes for navigation.
//!
//! - [`AdjacencyIndex`] - Outgoing and incoming (reverse) relationship keys per node
//!
//! # Layout
//!
//! Both directions map a node to the ordered set of [`RelationshipKey`]s
//! incident to it. Because keys order by `(rel_type, source, target)`, and
//! every key in a set shares the same anchor node, a range over one set
//! answers:
//!
//! - "edges of type R from X to nodes of type T" on the outgoing side
//! - "nodes of type T that reference X through R" on the incoming side
//!
//! [`RelationshipKey`]: kindred_core::RelationshipKey

mod adjacency;

pub use adjacency::AdjacencyIndex;
