//! `Kindred` - the graph store behind a genealogy record editor.
//!
//! Every dialog, search panel and importer in the editor reads and writes
//! through one [`GraphStore`]. The store assigns stable per-type ids to
//! nodes, keeps typed directed relationships between them with an
//! independent delete policy for each endpoint, and serves both table
//! scans and point-to-point navigation.
//!
//! # Quick Start
//!
//! ```
//! use kindred::{DeletePolicy, GraphStore, NodeRef, Properties, Value};
//!
//! let store = GraphStore::new();
//!
//! let mut citation = Properties::new();
//! citation.insert("page".to_owned(), Value::from("f. 12"));
//! let citation = store.upsert("citation", citation);
//!
//! let mut text = Properties::new();
//! text.insert("kind".to_owned(), Value::from("extract"));
//! let text = store.upsert("localized_text", text);
//!
//! store.upsert_relationship(
//!     "TRANSCRIPTION_FOR",
//!     NodeRef::new("localized_text", text),
//!     NodeRef::new("citation", citation),
//!     Properties::new(),
//!     DeletePolicy::CASCADE_BOTH,
//! )?;
//!
//! let texts = store.find_referencing_nodes(
//!     "localized_text",
//!     &NodeRef::new("citation", citation),
//!     "TRANSCRIPTION_FOR",
//!     None,
//! );
//! assert_eq!(texts.len(), 1);
//!
//! // Deleting the citation takes its transcriptions with it.
//! store.delete("citation", citation);
//! assert!(store.scan_all("localized_text").is_empty());
//! # Ok::<(), kindred::Error>(())
//! ```
//!
//! # Configuration
//!
//! Use [`StoreBuilder`] to name a store (for log output) or to forbid
//! more than one outgoing relationship of a type per node:
//!
//! ```
//! use kindred::{FanOut, StoreBuilder};
//!
//! let store = StoreBuilder::new().name("fixtures").fan_out(FanOut::Forbid).build()?;
//! assert_eq!(store.config().name, "fixtures");
//! # Ok::<(), kindred::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`config`] - Store configuration and builder
//! - [`store`] - The shared store handle
//! - [`typed`] - Typed record helpers
//! - [`error`] - Error types

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod store;
pub mod typed;

pub use config::{StoreBuilder, StoreConfig};
pub use error::{Error, Result};
pub use store::GraphStore;

pub use kindred_core::{
    schema, CoreError, CoreResult, DeletePolicy, NodeId, NodeRef, NodeSchema, NodeType, OnDelete,
    Properties, RelType, Relationship, RelationshipKey, Value, ID_PROPERTY,
};
pub use kindred_graph::{CascadeOutcome, FanOut, Graph, GraphError, PropertyFilter};
