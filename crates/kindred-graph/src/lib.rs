//! `Kindred` Graph
//!
//! This crate provides the in-memory graph engine behind the `Kindred`
//! store: typed nodes with per-type identities, typed directed
//! relationships with per-endpoint delete policies, and the indexes that
//! serve both table scans and point-to-point navigation.
//!
//! # Modules
//!
//! - [`store`] - Node and relationship storage, cascade deletes, the [`Graph`] engine
//! - [`index`] - Adjacency indexes (forward and reverse)
//!
//! Nothing in this crate locks. [`Graph`] takes `&mut self` for every
//! mutation; sharing it between threads is the job of the caller.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod index;
pub mod store;

pub use store::{CascadeOutcome, FanOut, Graph, GraphError, GraphResult, PropertyFilter};
