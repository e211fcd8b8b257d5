//! Typed record helpers.
//!
//! These translate between a [`NodeSchema`] struct and the generic property
//! map at the store boundary.

use kindred_core::{NodeId, NodeSchema};

use crate::error::Result;
use crate::store::GraphStore;

impl GraphStore {
    /// Insert or replace a typed record, returning its id.
    ///
    /// A record whose [`NodeSchema::id`] names a live node replaces it;
    /// otherwise a fresh id is allocated.
    pub fn upsert_typed<T: NodeSchema>(&self, record: &T) -> NodeId {
        self.upsert(T::NODE_TYPE, record.to_properties())
    }

    /// Read a typed record.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record cannot be converted to `T`.
    pub fn get_typed<T: NodeSchema>(&self, id: NodeId) -> Result<Option<T>> {
        let Some(props) = self.get(T::NODE_TYPE, id) else {
            return Ok(None);
        };
        Ok(Some(T::from_properties(&props)?))
    }

    /// Snapshot of every record of `T`'s type, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if any stored record cannot be converted to `T`.
    pub fn scan_typed<T: NodeSchema>(&self) -> Result<Vec<T>> {
        self.scan_all(T::NODE_TYPE)
            .iter()
            .map(|props| T::from_properties(props).map_err(Into::into))
            .collect()
    }
}
