//! Node and relationship storage.
//!
//! # Overview
//!
//! - [`IdAllocator`] - Per-node-type monotonic identity allocation
//! - [`NodeStore`] - Node records by type and id
//! - [`RelationshipStore`] - Relationships by key, with the adjacency index
//! - [`Graph`] - Mutation and query entry points over all three,
//!   including cascade delete resolution
//!
//! # Example
//!
//! ```
//! use kindred_core::{DeletePolicy, NodeRef, Properties};
//! use kindred_graph::Graph;
//!
//! let mut graph = Graph::new();
//! let citation = graph.upsert("citation", Properties::new());
//! let text = graph.upsert("localized_text", Properties::new());
//!
//! graph.upsert_relationship(
//!     "TRANSCRIPTION_FOR",
//!     NodeRef::new("localized_text", text),
//!     NodeRef::new("citation", citation),
//!     Properties::new(),
//!     DeletePolicy::CASCADE_BOTH,
//! )?;
//!
//! graph.delete("citation", citation);
//! assert!(graph.scan_all("localized_text").is_empty());
//! # Ok::<(), kindred_graph::GraphError>(())
//! ```

mod cascade;
mod dump;
mod error;
mod graph;
mod id_gen;
mod node;
mod relationship;


pub use cascade::CascadeOutcome;
pub use error::{GraphError, GraphResult};
pub use graph::{FanOut, Graph, PropertyFilter};
pub use id_gen::IdAllocator;
pub use node::{NodeStore, Origin};
pub use relationship::RelationshipStore;
