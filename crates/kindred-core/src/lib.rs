//! `Kindred` Core
//!
//! This crate provides the fundamental types shared by every layer of the
//! `Kindred` graph store: node identities, type names, property values,
//! relationship keys and their delete policies.
//!
//! # Modules
//!
//! - [`types`] - Core data types (ids, names, values, relationships)
//! - [`schema`] - Typed record adapter for the generic property map
//! - [`error`] - Error types

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, CoreResult};
pub use schema::NodeSchema;
pub use types::{
    DeletePolicy, NodeId, NodeRef, NodeType, OnDelete, Properties, RelType, Relationship,
    RelationshipKey, Value, ID_PROPERTY,
};
