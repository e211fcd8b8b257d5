//! Core data types for `Kindred`.
//!
//! This module defines the identities, names and values that make up nodes
//! and relationships in the graph store.

mod id;
mod name;
mod relationship;
mod value;

pub use id::{NodeId, NodeRef};
pub use name::{NodeType, RelType};
pub use relationship::{DeletePolicy, OnDelete, Relationship, RelationshipKey};
pub use value::{Properties, Value, ID_PROPERTY};
