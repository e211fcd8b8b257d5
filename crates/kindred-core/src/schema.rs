//! Typed record adapter.
//!
//! Inside the application each logical entity is a plain struct; the store
//! itself only knows string-keyed [`Properties`]. [`NodeSchema`] is the thin
//! translation layer between the two, used at the edges of the system
//! (import, export, generic diagnostics).
//!
//! # Example
//!
//! ```
//! use kindred_core::schema::{self, NodeSchema};
//! use kindred_core::{CoreResult, NodeId, Properties};
//!
//! struct Place {
//!     id: Option<NodeId>,
//!     name: String,
//! }
//!
//! impl NodeSchema for Place {
//!     const NODE_TYPE: &'static str = "place";
//!
//!     fn id(&self) -> Option<NodeId> {
//!         self.id
//!     }
//!
//!     fn to_properties(&self) -> Properties {
//!         let mut props = schema::with_id(self.id);
//!         props.insert("name".to_owned(), self.name.as_str().into());
//!         props
//!     }
//!
//!     fn from_properties(props: &Properties) -> CoreResult<Self> {
//!         Ok(Self { id: schema::record_id(props), name: schema::require_str(props, "name")? })
//!     }
//! }
//!
//! let place = Place { id: None, name: "Leeds".to_owned() };
//! let back = Place::from_properties(&place.to_properties()).unwrap();
//! assert_eq!(back.name, "Leeds");
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{NodeId, Properties, Value, ID_PROPERTY};

/// A typed record that maps onto a node of one fixed type.
pub trait NodeSchema: Sized {
    /// The node type this record is stored under.
    const NODE_TYPE: &'static str;

    /// The record's identity, if it has been stored before.
    fn id(&self) -> Option<NodeId>;

    /// Convert to the generic property map.
    ///
    /// Implementations should include the `id` property when [`Self::id`]
    /// is set so that an upsert replaces rather than inserts.
    fn to_properties(&self) -> Properties;

    /// Build the record from a stored property map.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] if a required property is missing or has the
    /// wrong kind.
    fn from_properties(properties: &Properties) -> CoreResult<Self>;
}

/// Start a property map, carrying `id` when one is given.
#[must_use]
pub fn with_id(id: Option<NodeId>) -> Properties {
    let mut props = Properties::new();
    if let Some(id) = id {
        props.insert(ID_PROPERTY.to_owned(), id.into());
    }
    props
}

/// The identity stored in a record, if any.
#[must_use]
pub fn record_id(props: &Properties) -> Option<NodeId> {
    props.get(ID_PROPERTY).and_then(NodeId::from_value)
}

/// Read a required string property.
///
/// # Errors
///
/// Returns [`CoreError::MissingProperty`] or [`CoreError::TypeMismatch`].
pub fn require_str(props: &Properties, key: &str) -> CoreResult<String> {
    optional_str(props, key)?.ok_or_else(|| CoreError::MissingProperty(key.to_owned()))
}

/// Read an optional string property. `Null` reads as absent.
///
/// # Errors
///
/// Returns [`CoreError::TypeMismatch`] if the value is not a string.
pub fn optional_str(props: &Properties, key: &str) -> CoreResult<Option<String>> {
    match props.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(key, "string", other)),
    }
}

/// Read a required integer property.
///
/// # Errors
///
/// Returns [`CoreError::MissingProperty`] or [`CoreError::TypeMismatch`].
pub fn require_int(props: &Properties, key: &str) -> CoreResult<i64> {
    optional_int(props, key)?.ok_or_else(|| CoreError::MissingProperty(key.to_owned()))
}

/// Read an optional integer property. `Null` reads as absent.
///
/// # Errors
///
/// Returns [`CoreError::TypeMismatch`] if the value is not an integer.
pub fn optional_int(props: &Properties, key: &str) -> CoreResult<Option<i64>> {
    match props.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(other) => Err(mismatch(key, "int", other)),
    }
}

fn mismatch(key: &str, expected: &'static str, actual: &Value) -> CoreError {
    CoreError::TypeMismatch { key: key.to_owned(), expected, actual: actual.kind() }
}
